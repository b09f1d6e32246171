use globset::Glob;
use regex::Regex;

use crate::error::Error;

use super::types::{FabricImage, NewImageData, OsFamily};

/// Return the new image data for a region. Images whose name does not carry
/// the leading 'vendor-version' segments can't be matched against a mapping
/// name and are skipped.
pub fn get_image_data_by_external_region_id(
  external_region_id: &str,
  new_image_vec: &[FabricImage],
) -> Vec<NewImageData> {
  let mut result = Vec::new();

  for fabric_image in new_image_vec {
    log::debug!(
      "region ids {} input {}",
      fabric_image.external_region_id,
      external_region_id
    );

    if fabric_image.external_region_id == external_region_id {
      log::info!("Found match by externalRegionId");

      match fabric_image.mapping_key() {
        Some(image_name) => result.push(NewImageData {
          id: fabric_image.id.clone(),
          name: fabric_image.name.clone(),
          image_name,
        }),
        None => log::warn!(
          "Fabric image '{}' does not follow the 'vendor-version' naming convention, skipping",
          fabric_image.name
        ),
      }
    }
  }

  result
}

pub fn filter(
  fabric_image_vec: &mut Vec<FabricImage>,
  name_pattern_opt: Option<&str>,
  os_family_opt: Option<&OsFamily>,
  limit_number_opt: Option<&u8>,
) -> Result<Vec<FabricImage>, Error> {
  log::info!("Filter fabric images");

  if let Some(name_pattern) = name_pattern_opt {
    let glob = Glob::new(name_pattern)?.compile_matcher();

    fabric_image_vec
      .retain(|fabric_image| glob.is_match(&fabric_image.name));
  }

  if let Some(os_family) = os_family_opt {
    fabric_image_vec.retain(|fabric_image| {
      fabric_image.os_family.as_ref() == Some(os_family)
    });
  }

  if let Some(limit_number) = limit_number_opt {
    // Limiting the number of results to return to client
    *fabric_image_vec = fabric_image_vec[fabric_image_vec
      .len()
      .saturating_sub(*limit_number as usize)..]
      .to_vec();
  }

  Ok(fabric_image_vec.to_vec())
}

/// Check an image name follows the 'vendor-version[-build...]' convention.
pub fn validate_image_name_format(image_name: &str) -> bool {
  let image_name_re =
    Regex::new(r"^[A-Za-z0-9_]+-[A-Za-z0-9_.]+(-.+)?$").unwrap();

  image_name_re.is_match(image_name)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fabric_image(
    id: &str,
    name: &str,
    external_region_id: &str,
  ) -> FabricImage {
    FabricImage {
      id: id.to_string(),
      name: name.to_string(),
      external_region_id: external_region_id.to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn images_are_matched_by_external_region_id() {
    let new_image_vec = vec![
      fabric_image("img-1", "ubuntu-2004-1634102274", "us-west-1"),
      fabric_image("img-2", "ubuntu-2004-1634102274", "us-east-1"),
      fabric_image("img-3", "centos-8-1634102274", "us-west-1"),
    ];

    let result =
      get_image_data_by_external_region_id("us-west-1", &new_image_vec);

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].id, "img-1");
    assert_eq!(result[0].image_name, "ubuntu-2004");
    assert_eq!(result[1].id, "img-3");
    assert_eq!(result[1].image_name, "centos-8");
  }

  #[test]
  fn no_match_returns_empty_subset() {
    let new_image_vec =
      vec![fabric_image("img-1", "ubuntu-2004-1634102274", "us-west-1")];

    assert!(
      get_image_data_by_external_region_id("eu-central-1", &new_image_vec)
        .is_empty()
    );
  }

  #[test]
  fn images_without_version_segment_are_skipped() {
    let new_image_vec = vec![
      fabric_image("img-1", "standalone", "us-west-1"),
      fabric_image("img-2", "ubuntu-2004-1634102274", "us-west-1"),
    ];

    let result =
      get_image_data_by_external_region_id("us-west-1", &new_image_vec);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "ubuntu-2004-1634102274");
  }

  #[test]
  fn filter_by_name_pattern_and_limit() {
    let mut fabric_image_vec = vec![
      fabric_image("img-1", "ubuntu-2004-1", "us-west-1"),
      fabric_image("img-2", "ubuntu-2204-2", "us-west-1"),
      fabric_image("img-3", "centos-8-3", "us-west-1"),
    ];

    let result =
      filter(&mut fabric_image_vec, Some("ubuntu-*"), None, None).unwrap();

    assert_eq!(result.len(), 2);

    let result = filter(&mut fabric_image_vec, None, None, Some(&1)).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "img-2");
  }

  #[test]
  fn filter_by_os_family() {
    let mut fabric_image_vec = vec![
      FabricImage {
        os_family: Some(OsFamily::Linux),
        ..fabric_image("img-1", "ubuntu-2004-1", "us-west-1")
      },
      FabricImage {
        os_family: Some(OsFamily::Windows),
        ..fabric_image("img-2", "windows-2019-1", "us-west-1")
      },
    ];

    let result =
      filter(&mut fabric_image_vec, None, Some(&OsFamily::Linux), None)
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "img-1");
  }

  #[test]
  fn image_name_format_validation() {
    assert!(validate_image_name_format("ubuntu-2004-1634102274"));
    assert!(validate_image_name_format("centos-8"));
    assert!(!validate_image_name_format("standalone"));
    assert!(!validate_image_name_format("-2004"));
  }
}
