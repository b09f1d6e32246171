use secrecy::SecretString;

use crate::{
  common::authentication,
  error::Error,
  fabric_image,
  image_profile::{self, types::ImageProfile},
};

/// Propagate newly built fabric images into the region image profiles.
///
/// One run is linear: authenticate, fetch the new images and the image
/// profiles, then per profile rebuild the mapping payload and PATCH it.
/// `update_prod_mappings` must be set explicitly by the pipeline, with both
/// flags false every profile is patched with a faithful copy of its current
/// mappings.
pub async fn exec(
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  refresh_token: &SecretString,
  image_filter_opt: Option<&str>,
  profile_name_pattern_opt: Option<&str>,
  add_test_mappings: bool,
  update_prod_mappings: bool,
) -> Result<Vec<ImageProfile>, Error> {
  let vrac_token = authentication::get_api_token(
    vrac_base_url,
    vrac_root_cert_opt,
    refresh_token,
  )
  .await?;

  let new_image_vec = fabric_image::http_client::get(
    &vrac_token,
    vrac_base_url,
    vrac_root_cert_opt,
    image_filter_opt,
  )
  .await?;

  log::info!("Found {} newly built fabric images", new_image_vec.len());

  let mut image_profile_vec = image_profile::http_client::get(
    &vrac_token,
    vrac_base_url,
    vrac_root_cert_opt,
    None,
  )
  .await?;

  let image_profile_vec = image_profile::utils::filter(
    &mut image_profile_vec,
    profile_name_pattern_opt,
    &[],
    None,
  )?;

  let mut patched_image_profile_vec = Vec::new();

  for image_profile in image_profile_vec {
    log::info!("The profile name is {}", image_profile.name);
    log::info!(
      "The externalRegionId is {}",
      image_profile.external_region_id
    );

    // Log the original image mapping for a region. Just in case the update
    // breaks some thing
    log::info!("**************************************");
    log::info!(
      "The original image mapping payload for {}",
      image_profile.external_region_id
    );
    log::info!("{}", serde_json::to_string(&image_profile.image_mappings)?);
    log::info!("**************************************");

    let image_profile_spec = image_profile::utils::build_patch_payload(
      &image_profile,
      &new_image_vec,
      add_test_mappings,
      update_prod_mappings,
    )?;

    log::info!(
      "The new profile payload for {} is :: {}",
      image_profile.external_region_id,
      serde_json::to_string(&image_profile_spec)?
    );

    // The bearer token may expire while looping over profiles, refresh it
    // before each update
    let vrac_token = authentication::get_api_token(
      vrac_base_url,
      vrac_root_cert_opt,
      refresh_token,
    )
    .await?;

    let patched_image_profile = image_profile::http_client::patch(
      &vrac_token,
      vrac_base_url,
      vrac_root_cert_opt,
      &image_profile.id,
      &image_profile_spec,
    )
    .await?;

    patched_image_profile_vec.push(patched_image_profile);
  }

  Ok(patched_image_profile_vec)
}
