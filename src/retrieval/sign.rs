//! SigV4 signing for retrieve requests.

use std::time::SystemTime;

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings, sign};
use aws_sigv4::sign::v4::SigningParams;
use aws_smithy_runtime_api::client::identity::Identity;

use super::RetrievalError;

/// Signing name of the bedrock-agent-runtime service.
const SIGNING_NAME: &str = "bedrock";

/// Sign a request and return the headers to attach to it.
pub(crate) fn sign_request(
    credentials: &Credentials,
    region: &str,
    method: &str,
    url: &str,
    body: &[u8],
) -> Result<Vec<(String, String)>, RetrievalError> {
    let identity = Identity::new(credentials.clone(), credentials.expiry());

    let signing_params = SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(SIGNING_NAME)
        .time(SystemTime::now())
        .settings(SigningSettings::default())
        .build()
        .map_err(|e| RetrievalError::Transport(e.to_string()))?;

    let signable_request = SignableRequest::new(
        method,
        url,
        std::iter::empty::<(&str, &str)>(),
        SignableBody::Bytes(body),
    )
    .map_err(|e| RetrievalError::Transport(e.to_string()))?;

    let (signing_instructions, _) = sign(signable_request, &signing_params.into())
        .map_err(|e| RetrievalError::Transport(e.to_string()))?
        .into_parts();

    Ok(signing_instructions
        .headers()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect())
}
