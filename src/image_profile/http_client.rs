use crate::{common::http_client, error::Error};

use super::types::{ImageProfile, ImageProfileList, ImageProfileSpec};

pub async fn get(
  vrac_token: &str,
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  filter_opt: Option<&str>,
) -> Result<Vec<ImageProfile>, Error> {
  let client = http_client::client(vrac_root_cert_opt)?;

  let api_url = format!("{}/iaas/api/image-profiles", vrac_base_url);

  log::info!("Fetch image profiles from {}", api_url);

  let mut request = client.get(api_url).bearer_auth(vrac_token);

  if let Some(filter) = filter_opt {
    request = request.query(&[("$filter", filter)]);
  }

  let response = http_client::send_with_retries(request).await?;

  if response.status().is_success() {
    response
      .json::<ImageProfileList>()
      .await
      .map(|image_profile_list| image_profile_list.content)
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
  image_profile_id: &str,
) -> Result<ImageProfile, Error> {
  let client = http_client::client(vrac_root_cert_opt)?;

  let api_url = format!(
    "{}/iaas/api/image-profiles/{}",
    vrac_base_url, image_profile_id
  );

  let response = http_client::send_with_retries(
    client.get(api_url).bearer_auth(vrac_token),
  )
  .await?;

  if response.status() == reqwest::StatusCode::NOT_FOUND {
    return Err(Error::ImageProfileNotFound(image_profile_id.to_string()));
  }

  if response.status().is_success() {
    let payload = response.json().await.map_err(Error::NetError);

    log::debug!("Image profile details\n{:#?}", payload);

    payload
  } else {
    let error_payload = response.json().await.map_err(Error::NetError)?;

    Err(Error::VracError(error_payload))
  }
}

pub async fn post(
  vrac_token: &str,
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  image_profile_spec: &ImageProfileSpec,
) -> Result<ImageProfile, Error> {
  log::info!("Create image profile '{}'", image_profile_spec.name);

  let client = http_client::client(vrac_root_cert_opt)?;

  let api_url = format!("{}/iaas/api/image-profiles", vrac_base_url);

  let response = http_client::send_with_retries(
    client
      .post(api_url)
      .bearer_auth(vrac_token)
      .json(image_profile_spec),
  )
  .await?;

  if response.status().is_success() {
    response.json().await.map_err(Error::NetError)
  } else {
    let error_payload = response.json().await.map_err(Error::NetError)?;

    Err(Error::VracError(error_payload))
  }
}

pub async fn patch(
  vrac_token: &str,
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  image_profile_id: &str,
  image_profile_spec: &ImageProfileSpec,
) -> Result<ImageProfile, Error> {
  log::info!("Update image profile '{}'", image_profile_id);

  let client = http_client::client(vrac_root_cert_opt)?;

  let api_url = format!(
    "{}/iaas/api/image-profiles/{}",
    vrac_base_url, image_profile_id
  );

  let response = http_client::send_with_retries(
    client
      .patch(api_url)
      .bearer_auth(vrac_token)
      .json(image_profile_spec),
  )
  .await?;

  if let Err(e) = response.error_for_status_ref() {
    match response.status() {
      reqwest::StatusCode::UNAUTHORIZED => {
        let error_payload = response.text().await?;
        let error = Error::RequestError {
          response: e,
          payload: error_payload,
        };
        return Err(error);
      }
      _ => {
        let error_payload = response.json().await.map_err(Error::NetError)?;
        return Err(Error::VracError(error_payload));
      }
    }
  }

  response.json().await.map_err(Error::NetError)
}

pub async fn delete(
  vrac_token: &str,
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  image_profile_id: &str,
) -> Result<(), Error> {
  log::info!("Delete image profile '{}'", image_profile_id);

  let client = http_client::client(vrac_root_cert_opt)?;

  let api_url = format!(
    "{}/iaas/api/image-profiles/{}",
    vrac_base_url, image_profile_id
  );

  let response = http_client::send_with_retries(
    client.delete(api_url).bearer_auth(vrac_token),
  )
  .await?;

  if response.status() == reqwest::StatusCode::NOT_FOUND {
    return Err(Error::ImageProfileNotFound(image_profile_id.to_string()));
  }

  if response.status().is_success() {
    Ok(())
  } else {
    let error_payload = response.json().await.map_err(Error::NetError)?;

    Err(Error::VracError(error_payload))
  }
}
