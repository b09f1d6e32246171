use serde_json::Value;

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};

use crate::{
  common::{http_client, jwt_ops},
  error::Error,
};

/// Exchange a vRA refresh token for a bearer token. The bearer token is a
/// CSP JWT valid for a few hours, callers re-authenticate per mutation
/// rather than tracking expiry.
pub async fn get_api_token(
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  refresh_token: &SecretString,
) -> Result<String, Error> {
  let mut payload = HashMap::new();
  // Refresh tokens handed over by pipelines tend to carry a trailing
  // newline, strip it before sending
  payload.insert(
    "refreshToken",
    refresh_token.expose_secret().replace('\n', ""),
  );

  let client = http_client::client(vrac_root_cert_opt)?;

  let api_url = format!("{}/iaas/api/login", vrac_base_url);

  log::debug!("Request to fetch API token: {}", api_url);

  let response =
    http_client::send_with_retries(client.post(api_url).json(&payload))
      .await?;

  if response.status().is_success() {
    let token = response
      .json::<Value>()
      .await?
      .get("token")
      .and_then(Value::as_str)
      .map(str::to_string)
      .ok_or_else(|| {
        Error::Message(
          "field 'token' missing in login response".to_string(),
        )
      })?;

    if let Ok(username) = jwt_ops::get_username(&token) {
      log::debug!("API token issued for user '{}'", username);
    }

    Ok(token)
  } else {
    let error_payload = response.json().await.map_err(Error::NetError)?;

    Err(Error::VracError(error_payload))
  }
}

/// Cheap probe to check a bearer token is still accepted by the IaaS API.
pub async fn validate_api_token(
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  vrac_token: &str,
) -> Result<(), Error> {
  let client = http_client::client(vrac_root_cert_opt)?;

  let api_url = format!("{}/iaas/api/about", vrac_base_url);

  log::info!("Validate API token against {}", api_url);

  let resp_rslt = client.get(api_url).bearer_auth(vrac_token).send().await;

  match resp_rslt {
    Ok(resp) => Ok(resp.error_for_status().map(|_| ())?),
    Err(error) => {
      Err(Error::Message(format!("Token is not valid: {}", error)))
    }
  }
}
