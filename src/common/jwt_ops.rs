use base64::{decode_config, URL_SAFE_NO_PAD};
use serde_json::Value;

use crate::error::Error;

fn get_claims_from_jwt_token(token: &str) -> Result<Value, Error> {
  let base64_claims = token
    .split(' ')
    .nth(1)
    .unwrap_or(token)
    .split('.')
    .nth(1)
    .unwrap_or("JWT Token not valid");

  let claims_u8 =
    decode_config(base64_claims, URL_SAFE_NO_PAD).map_err(|e| {
      Error::Message(format!(
        "ERROR - could not get claims in JWT token. Reason:\n{}",
        e
      ))
    })?;

  let claims_str = std::str::from_utf8(&claims_u8).map_err(|_| {
    Error::Message("ERROR - could not convert JWT claims to string".to_string())
  })?;

  serde_json::from_str::<Value>(claims_str).map_err(|_| {
    Error::Message(
      "ERROR - could not convert JWT claims to a JSON object".to_string(),
    )
  })
}

/// CSP tokens carry the account name in the 'username' claim.
pub fn get_username(token: &str) -> Result<String, Error> {
  let jwt_claims = get_claims_from_jwt_token(token)?;

  let jwt_username = jwt_claims.get("username").and_then(Value::as_str);

  match jwt_username {
    Some(username) => Ok(username.to_string()),
    None => Err(Error::TokenClaimNotFound("username".to_string())),
  }
}

/// Expiry time of the bearer token as seconds since the epoch.
pub fn get_exp(token: &str) -> Result<u64, Error> {
  get_claims_from_jwt_token(token)?
    .get("exp")
    .and_then(Value::as_u64)
    .ok_or_else(|| Error::TokenClaimNotFound("exp".to_string()))
}

/// Organisation the token was issued for.
pub fn get_org_id(token: &str) -> Result<String, Error> {
  get_claims_from_jwt_token(token)?
    .get("context_name")
    .and_then(Value::as_str)
    .map(str::to_string)
    .ok_or_else(|| Error::TokenClaimNotFound("context_name".to_string()))
}
