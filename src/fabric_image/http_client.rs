use crate::{common::http_client, error::Error};

use super::types::{FabricImage, FabricImageList};

/// Fetch fabric images, optionally narrowed down with a '$filter'
/// expression (eg `tags.item.key eq 'packer'`). Only the first page is
/// requested, recently built images always land there.
pub async fn get(
  vrac_token: &str,
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  filter_opt: Option<&str>,
) -> Result<Vec<FabricImage>, Error> {
  let client = http_client::client(vrac_root_cert_opt)?;

  let api_url = format!("{}/iaas/api/fabric-images", vrac_base_url);

  log::info!("Fetch fabric images from {}", api_url);

  let mut request = client.get(api_url).bearer_auth(vrac_token);

  if let Some(filter) = filter_opt {
    request = request.query(&[("$filter", filter)]);
  }

  let response = http_client::send_with_retries(request).await?;

  if response.status().is_success() {
    response
      .json::<FabricImageList>()
      .await
      .map(|fabric_image_list| fabric_image_list.content)
      .map_err(Error::NetError)
  } else {
    let error_payload = response.json().await.map_err(Error::NetError)?;

    Err(Error::VracError(error_payload))
  }
}

pub async fn get_by_id(
  vrac_token: &str,
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  fabric_image_id: &str,
) -> Result<FabricImage, Error> {
  let client = http_client::client(vrac_root_cert_opt)?;

  let api_url = format!(
    "{}/iaas/api/fabric-images/{}",
    vrac_base_url, fabric_image_id
  );

  let response = http_client::send_with_retries(
    client.get(api_url).bearer_auth(vrac_token),
  )
  .await?;

  if response.status().is_success() {
    let payload = response.json().await.map_err(Error::NetError);

    log::debug!("Fabric image details\n{:#?}", payload);

    payload
  } else {
    let error_payload = response.json().await.map_err(Error::NetError)?;

    Err(Error::VracError(error_payload))
  }
}
