pub mod delete_image_profile;
pub mod get_images_and_details;
pub mod update_image_profiles;
