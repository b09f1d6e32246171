use std::collections::HashMap;

use globset::Glob;

use crate::{
  error::Error,
  fabric_image::{self, types::FabricImage},
};

use super::types::{ImageMappingEntry, ImageProfile, ImageProfileSpec};

pub fn filter(
  image_profile_vec: &mut Vec<ImageProfile>,
  name_pattern_opt: Option<&str>,
  external_region_id_vec: &[&str],
  limit_number_opt: Option<&u8>,
) -> Result<Vec<ImageProfile>, Error> {
  log::info!("Filter image profiles");

  if let Some(name_pattern) = name_pattern_opt {
    let glob = Glob::new(name_pattern)?.compile_matcher();

    image_profile_vec
      .retain(|image_profile| glob.is_match(&image_profile.name));
  }

  if !external_region_id_vec.is_empty() {
    image_profile_vec.retain(|image_profile| {
      external_region_id_vec
        .contains(&image_profile.external_region_id.as_str())
    });
  }

  if let Some(limit_number) = limit_number_opt {
    // Limiting the number of results to return to client
    *image_profile_vec = image_profile_vec[image_profile_vec
      .len()
      .saturating_sub(*limit_number as usize)..]
      .to_vec();
  }

  Ok(image_profile_vec.to_vec())
}

/// Build the full replacement payload for an image profile update.
///
/// Every existing mapping is carried over keeping its image id, then:
///  - `update_prod_mappings`: mappings whose name equals the
///    'vendor-version' key of a newly built image of the profile's region
///    are pointed at the new image,
///  - otherwise `add_test_mappings`: one extra mapping per new image is
///    added next to any existing mapping of the same region, keyed by the
///    full image name.
///
/// With both flags false the payload is a faithful copy of the profile.
pub fn build_patch_payload(
  image_profile: &ImageProfile,
  new_image_vec: &[FabricImage],
  add_test_mappings: bool,
  update_prod_mappings: bool,
) -> Result<ImageProfileSpec, Error> {
  // image data for the matching externalRegionId
  let new_image_data_vec =
    fabric_image::utils::get_image_data_by_external_region_id(
      &image_profile.external_region_id,
      new_image_vec,
    );

  log::debug!("New image data {:?}", new_image_data_vec);

  let region_id = image_profile.region_id()?;

  let mut image_mapping: HashMap<String, ImageMappingEntry> = HashMap::new();

  for (mapping_name, mapping_entry) in &image_profile.image_mappings.mapping {
    // copy original mappings over
    let mut payload_entry = ImageMappingEntry {
      name: mapping_entry.name.clone(),
      description: Some(mapping_entry.name.clone()),
      // Keep the original image Id
      id: mapping_entry.id.clone(),
      external_region_id: None,
    };

    if update_prod_mappings {
      // Now update the prod mappings by imageName
      for new_image_data in &new_image_data_vec {
        if new_image_data.image_name == *mapping_name {
          log::info!("Updating imageMapping - {}", mapping_name);

          payload_entry.name = new_image_data.name.clone();
          payload_entry.description = Some(new_image_data.name.clone());
          payload_entry.id = new_image_data.id.clone();
        }
      }
    } else if add_test_mappings {
      // add new test mappings by externalRegionId
      for fabric_image in new_image_vec {
        if mapping_entry.external_region_id.as_deref()
          == Some(fabric_image.external_region_id.as_str())
        {
          image_mapping.insert(
            fabric_image.name.clone(),
            ImageMappingEntry {
              name: fabric_image.name.clone(),
              description: Some(fabric_image.name.clone()),
              id: fabric_image.id.clone(),
              external_region_id: None,
            },
          );
        }
      }
    }

    image_mapping.insert(mapping_name.clone(), payload_entry);
  }

  Ok(ImageProfileSpec {
    name: image_profile.name.clone(),
    description: format!(
      "{}--CS-Generated-Image-Profile",
      image_profile.name
    ),
    region_id,
    image_mapping,
  })
}

#[cfg(test)]
mod tests {
  use crate::image_profile::types::{ImageMappings, Link};

  use super::*;

  fn image_profile() -> ImageProfile {
    serde_json::from_value(serde_json::json!({
      "id": "profile-1",
      "name": "us-west-profile",
      "externalRegionId": "us-west-1",
      "imageMappings": {
        "mapping": {
          "ubuntu-2004": {
            "name": "ubuntu-2004-1630000000",
            "id": "img-old-1",
            "description": "ubuntu 20.04",
            "externalRegionId": "us-west-1"
          },
          "centos-8": {
            "name": "centos-8-1630000000",
            "id": "img-old-2",
            "description": "centos 8",
            "externalRegionId": "us-west-1"
          }
        }
      },
      "_links": {
        "region": { "href": "/iaas/api/regions/region-9" }
      }
    }))
    .unwrap()
  }

  fn new_image_vec() -> Vec<FabricImage> {
    vec![
      FabricImage {
        id: "img-new-1".to_string(),
        name: "ubuntu-2004-1634102274".to_string(),
        external_region_id: "us-west-1".to_string(),
        ..Default::default()
      },
      FabricImage {
        id: "img-other-region".to_string(),
        name: "ubuntu-2004-1634102274".to_string(),
        external_region_id: "eu-central-1".to_string(),
        ..Default::default()
      },
    ]
  }

  #[test]
  fn payload_preserves_mappings_when_flags_are_false() {
    let payload =
      build_patch_payload(&image_profile(), &new_image_vec(), false, false)
        .unwrap();

    assert_eq!(payload.name, "us-west-profile");
    assert_eq!(
      payload.description,
      "us-west-profile--CS-Generated-Image-Profile"
    );
    assert_eq!(payload.region_id, "region-9");
    assert_eq!(payload.image_mapping.len(), 2);
    assert_eq!(
      payload.image_mapping["ubuntu-2004"].name,
      "ubuntu-2004-1630000000"
    );
    assert_eq!(payload.image_mapping["ubuntu-2004"].id, "img-old-1");
    assert_eq!(payload.image_mapping["centos-8"].id, "img-old-2");
  }

  #[test]
  fn prod_mappings_are_overwritten_by_image_name_key() {
    let payload =
      build_patch_payload(&image_profile(), &new_image_vec(), false, true)
        .unwrap();

    // matched mapping points at the new image
    assert_eq!(
      payload.image_mapping["ubuntu-2004"].name,
      "ubuntu-2004-1634102274"
    );
    assert_eq!(payload.image_mapping["ubuntu-2004"].id, "img-new-1");
    assert_eq!(
      payload.image_mapping["ubuntu-2004"].description.as_deref(),
      Some("ubuntu-2004-1634102274")
    );

    // unmatched mapping keeps the original image
    assert_eq!(payload.image_mapping["centos-8"].id, "img-old-2");
  }

  #[test]
  fn image_from_another_region_never_updates_prod_mappings() {
    let new_image_vec = vec![FabricImage {
      id: "img-other-region".to_string(),
      name: "ubuntu-2004-1634102274".to_string(),
      external_region_id: "eu-central-1".to_string(),
      ..Default::default()
    }];

    let payload =
      build_patch_payload(&image_profile(), &new_image_vec, false, true)
        .unwrap();

    assert_eq!(payload.image_mapping["ubuntu-2004"].id, "img-old-1");
  }

  #[test]
  fn test_mappings_are_added_for_matching_region() {
    let payload =
      build_patch_payload(&image_profile(), &new_image_vec(), true, false)
        .unwrap();

    // two originals plus one test mapping keyed by the full image name
    assert_eq!(payload.image_mapping.len(), 3);

    let test_entry = &payload.image_mapping["ubuntu-2004-1634102274"];
    assert_eq!(test_entry.name, "ubuntu-2004-1634102274");
    assert_eq!(test_entry.id, "img-new-1");

    // originals untouched
    assert_eq!(payload.image_mapping["ubuntu-2004"].id, "img-old-1");
  }

  #[test]
  fn prod_update_wins_over_test_mappings() {
    let payload =
      build_patch_payload(&image_profile(), &new_image_vec(), true, true)
        .unwrap();

    // no test mapping added when prod updates are requested
    assert_eq!(payload.image_mapping.len(), 2);
    assert_eq!(payload.image_mapping["ubuntu-2004"].id, "img-new-1");
  }

  #[test]
  fn missing_region_link_fails_payload_construction() {
    let image_profile = ImageProfile {
      id: "profile-1".to_string(),
      name: "no-links".to_string(),
      external_region_id: "us-west-1".to_string(),
      image_mappings: ImageMappings::default(),
      links: HashMap::<String, Link>::new(),
      description: None,
    };

    assert!(build_patch_payload(&image_profile, &[], false, false).is_err());
  }

  #[test]
  fn filter_by_name_region_and_limit() {
    let mut image_profile_vec = vec![
      ImageProfile {
        name: "us-west-profile".to_string(),
        external_region_id: "us-west-1".to_string(),
        ..Default::default()
      },
      ImageProfile {
        name: "us-east-profile".to_string(),
        external_region_id: "us-east-1".to_string(),
        ..Default::default()
      },
      ImageProfile {
        name: "eu-central-profile".to_string(),
        external_region_id: "eu-central-1".to_string(),
        ..Default::default()
      },
    ];

    let result =
      filter(&mut image_profile_vec.clone(), Some("us-*"), &[], None)
        .unwrap();

    assert_eq!(result.len(), 2);

    let result =
      filter(&mut image_profile_vec.clone(), None, &["us-east-1"], None)
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "us-east-profile");

    let result =
      filter(&mut image_profile_vec, None, &[], Some(&2)).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].name, "us-east-profile");
  }
}
