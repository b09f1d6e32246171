use secrecy::SecretString;

use crate::{
  common::authentication,
  error::Error,
  fabric_image::{
    self,
    types::{FabricImage, OsFamily},
  },
  image_profile,
};

/// Returns a tuple like (FabricImage struct, mapping key derived from the
/// image name, bool - indicates if an image profile of the image's region
/// already carries that mapping).
/// Meant for pipeline dry runs, it shows which images a subsequent profile
/// update would pick up and which ones nothing maps to yet.
pub async fn exec(
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  refresh_token: &SecretString,
  image_filter_opt: Option<&str>,
  name_pattern_opt: Option<&str>,
  os_family_opt: Option<&OsFamily>,
  limit_number_opt: Option<&u8>,
) -> Result<Vec<(FabricImage, String, bool)>, Error> {
  let vrac_token = authentication::get_api_token(
    vrac_base_url,
    vrac_root_cert_opt,
    refresh_token,
  )
  .await?;

  let mut fabric_image_vec = fabric_image::http_client::get(
    &vrac_token,
    vrac_base_url,
    vrac_root_cert_opt,
    image_filter_opt,
  )
  .await?;

  let fabric_image_vec = fabric_image::utils::filter(
    &mut fabric_image_vec,
    name_pattern_opt,
    os_family_opt,
    limit_number_opt,
  )?;

  let image_profile_vec = image_profile::http_client::get(
    &vrac_token,
    vrac_base_url,
    vrac_root_cert_opt,
    None,
  )
  .await?;

  let mut image_detail_vec = Vec::new();

  for fabric_image in fabric_image_vec {
    let mapping_key = match fabric_image.mapping_key() {
      Some(mapping_key) => mapping_key,
      None => {
        log::warn!(
          "Fabric image '{}' does not follow the 'vendor-version' naming convention, skipping",
          fabric_image.name
        );
        continue;
      }
    };

    let covered = image_profile_vec.iter().any(|image_profile| {
      image_profile.external_region_id == fabric_image.external_region_id
        && image_profile
          .image_mappings
          .mapping
          .contains_key(&mapping_key)
    });

    image_detail_vec.push((fabric_image, mapping_key, covered));
  }

  Ok(image_detail_vec)
}
