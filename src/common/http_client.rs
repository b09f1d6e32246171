use std::time::Duration;

use crate::error::Error;

/// Max number of retries for a request hitting a retryable status code or a
/// transport error. After the last attempt the response/error is handed back
/// to the caller as is.
pub const MAX_RETRIES: u32 = 5;

/// Base backoff factor in seconds. Delay before retry 'n' is
/// `BACKOFF_FACTOR_SECS * 2^(n - 1)` seconds.
pub const BACKOFF_FACTOR_SECS: u64 = 2;

/// Build the rest client used by all operations. TLS goes through rustls, an
/// extra root certificate can be provided when talking to an on-prem
/// installation with a private CA.
pub fn client(
  vrac_root_cert_opt: Option<&[u8]>,
) -> Result<reqwest::Client, Error> {
  let mut client_builder = reqwest::Client::builder().use_rustls_tls();

  if let Some(vrac_root_cert) = vrac_root_cert_opt {
    client_builder = client_builder
      .add_root_certificate(reqwest::Certificate::from_pem(vrac_root_cert)?);
  }

  // Build client
  if let Ok(socks5_env) = std::env::var("SOCKS5") {
    // socks5 proxy
    log::debug!("SOCKS5 enabled");
    let socks5proxy = reqwest::Proxy::all(socks5_env)?;

    client_builder = client_builder.proxy(socks5proxy);
  }

  Ok(client_builder.build()?)
}

/// Statuses worth retrying. Anything else is returned to the caller
/// immediately.
pub fn is_retryable(status: reqwest::StatusCode) -> bool {
  matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

pub fn backoff_delay(attempt: u32) -> Duration {
  Duration::from_secs(
    BACKOFF_FACTOR_SECS * 2_u64.pow(attempt.saturating_sub(1)),
  )
}

/// Send a request, retrying transient failures with exponential backoff.
/// GET/POST/PATCH/DELETE operations all go through here so they share the
/// same retry policy.
pub async fn send_with_retries(
  request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, Error> {
  let mut attempt = 0;

  loop {
    let request_clone = request.try_clone().ok_or_else(|| {
      Error::Message("Request is not clonable, can't apply retry policy".to_string())
    })?;

    match request_clone.send().await {
      Ok(response) => {
        if is_retryable(response.status()) && attempt < MAX_RETRIES {
          attempt += 1;

          log::warn!(
            "Request to {} failed with status {}. Retry {} of {} in {} seconds",
            response.url(),
            response.status(),
            attempt,
            MAX_RETRIES,
            backoff_delay(attempt).as_secs()
          );

          tokio::time::sleep(backoff_delay(attempt)).await;
        } else {
          return Ok(response);
        }
      }
      Err(error) => {
        if attempt < MAX_RETRIES {
          attempt += 1;

          log::warn!(
            "Request failed ({}). Retry {} of {} in {} seconds",
            error,
            attempt,
            MAX_RETRIES,
            backoff_delay(attempt).as_secs()
          );

          tokio::time::sleep(backoff_delay(attempt)).await;
        } else {
          return Err(Error::NetError(error));
        }
      }
    }
  }
}
