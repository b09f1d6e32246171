use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Link {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub href: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hrefs: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ImageMappingEntry {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[serde(rename = "externalRegionId")]
  pub external_region_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ImageMappings {
  #[serde(default)]
  pub mapping: HashMap<String, ImageMappingEntry>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ImageProfile {
  pub id: String,
  pub name: String,
  #[serde(rename = "externalRegionId")]
  pub external_region_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default)]
  #[serde(rename = "imageMappings")]
  pub image_mappings: ImageMappings,
  #[serde(default)]
  #[serde(rename = "_links")]
  pub links: HashMap<String, Link>,
}

impl ImageProfile {
  /// Region id taken from the profile's region link, the href looks like
  /// '/iaas/api/regions/<id>'.
  pub fn region_id(&self) -> Result<String, Error> {
    self
      .links
      .get("region")
      .and_then(|link| link.href.as_deref())
      .and_then(|href| href.split('/').nth(4))
      .map(str::to_string)
      .ok_or_else(|| {
        Error::ImageProfileRegionLinkNotDefined(self.name.clone())
      })
  }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ImageProfileList {
  pub content: Vec<ImageProfile>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[serde(rename = "totalElements")]
  pub total_elements: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[serde(rename = "numberOfElements")]
  pub number_of_elements: Option<usize>,
}

/// Payload for image profile POST/PATCH requests. The mapping dictionary is
/// a full replacement, the API drops mappings missing from it.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ImageProfileSpec {
  pub name: String,
  pub description: String,
  #[serde(rename = "regionId")]
  pub region_id: String,
  #[serde(rename = "imageMapping")]
  pub image_mapping: HashMap<String, ImageMappingEntry>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn image_profile_deserializes_from_api_body() {
    let image_profile: ImageProfile = serde_json::from_value(
      serde_json::json!({
        "id": "profile-1",
        "name": "us-west-profile",
        "externalRegionId": "us-west-1",
        "imageMappings": {
          "mapping": {
            "ubuntu-2004": {
              "name": "ubuntu-2004-1634102274",
              "id": "img-1",
              "description": "ubuntu 20.04",
              "externalRegionId": "us-west-1"
            }
          }
        },
        "_links": {
          "region": { "href": "/iaas/api/regions/region-9" },
          "self": { "href": "/iaas/api/image-profiles/profile-1" }
        }
      }),
    )
    .unwrap();

    assert_eq!(image_profile.external_region_id, "us-west-1");
    assert_eq!(
      image_profile.image_mappings.mapping["ubuntu-2004"].id,
      "img-1"
    );
    assert_eq!(image_profile.region_id().unwrap(), "region-9");
  }

  #[test]
  fn missing_region_link_is_an_error() {
    let image_profile = ImageProfile {
      id: "profile-1".to_string(),
      name: "no-links".to_string(),
      external_region_id: "us-west-1".to_string(),
      ..Default::default()
    };

    assert!(matches!(
      image_profile.region_id(),
      Err(Error::ImageProfileRegionLinkNotDefined(name)) if name == "no-links"
    ));
  }
}
