use std::collections::HashMap;

use strum_macros::Display;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Link {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub href: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hrefs: Option<Vec<String>>,
}

#[derive(Display, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum OsFamily {
  #[serde(rename = "LINUX")]
  Linux,
  #[serde(rename = "WINDOWS")]
  Windows,
}

impl OsFamily {
  pub fn from_str(os_family: &str) -> Result<OsFamily, Error> {
    match os_family {
      "linux" => Ok(OsFamily::Linux),
      "windows" => Ok(OsFamily::Windows),
      _ => Err(Error::Message("OS family not valid".to_string())),
    }
  }
}

/// Region scoped build artifact discovered by the fabric after an image
/// build.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FabricImage {
  pub id: String,
  pub name: String,
  #[serde(rename = "externalRegionId")]
  pub external_region_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[serde(rename = "externalId")]
  pub external_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[serde(rename = "osFamily")]
  pub os_family: Option<OsFamily>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[serde(rename = "isPrivate")]
  pub is_private: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[serde(rename = "_links")]
  pub links: Option<HashMap<String, Link>>,
}

impl FabricImage {
  /// Mapping key derived from the image name, image names follow the
  /// 'vendor-version-build...' convention and the leading 'vendor-version'
  /// segments name the image profile mapping to update.
  pub fn mapping_key(&self) -> Option<String> {
    let mut name_split = self.name.split('-');

    match (name_split.next(), name_split.next()) {
      (Some(vendor), Some(version)) => {
        Some(format!("{}-{}", vendor, version))
      }
      _ => None,
    }
  }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FabricImageList {
  pub content: Vec<FabricImage>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[serde(rename = "totalElements")]
  pub total_elements: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[serde(rename = "numberOfElements")]
  pub number_of_elements: Option<usize>,
}

/// Image data extracted for a region, carries the mapping key the image
/// resolves to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NewImageData {
  pub id: String,
  pub name: String,
  #[serde(rename = "imageName")]
  pub image_name: String,
}
