use dialoguer::Confirm;
use secrecy::SecretString;

use crate::{common::authentication, error::Error, image_profile};

pub async fn exec(
  vrac_base_url: &str,
  vrac_root_cert_opt: Option<&[u8]>,
  refresh_token: &SecretString,
  image_profile_id: &str,
  assume_yes: bool,
) -> Result<(), Error> {
  if !assume_yes {
    let confirmed = Confirm::new()
      .with_prompt(format!(
        "Image profile '{}' will be deleted. Please confirm to proceed",
        image_profile_id
      ))
      .interact()?;

    if !confirmed {
      log::info!("Operation canceled by user");

      return Err(Error::Message("Operation canceled by user".to_string()));
    }
  }

  let vrac_token = authentication::get_api_token(
    vrac_base_url,
    vrac_root_cert_opt,
    refresh_token,
  )
  .await?;

  image_profile::http_client::delete(
    &vrac_token,
    vrac_base_url,
    vrac_root_cert_opt,
    image_profile_id,
  )
  .await
}
