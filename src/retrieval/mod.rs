//! Retrieval client for the Bedrock Knowledge Base `Retrieve` API.
//!
//! One signed HTTPS request per call, retrieval-only (no generative step),
//! no retry and no pagination. The raw response is normalized into the
//! [`crate::models`] shapes; failures are classified into one of three
//! causes so the tool boundary can log internals without exposing them.

mod parse;
mod sign;

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_credential_types::provider::ProvideCredentials;
use serde_json::Value;
use tracing::{error, info};

use crate::Error;
use crate::config::Settings;
use crate::models::OpeningsResponse;

/// Failure classes for one retrieve call.
///
/// The `Display` rendering is the human-readable cause string; it is meant
/// for the diagnostic stream, never for the tool caller.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// The service returned a structured error response.
    #[error("service rejected request ({code}): {message}")]
    ServiceRejected { code: String, message: String },

    /// Network, signing, or body-decoding failure before a structured
    /// service response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Anything else.
    #[error("unexpected failure: {0}")]
    Unclassified(String),
}

/// Retrieval seam between the tool boundary and the network client.
///
/// The production implementation is [`KnowledgeBaseClient`]; tests
/// substitute a double without any global state.
#[async_trait]
pub trait OpeningsRetriever: Send + Sync {
    /// Run one similarity search and normalize the raw results.
    ///
    /// `query_text` and `max_results` are assumed already validated by the
    /// query envelope; `max_results` is passed through as the service's
    /// result-count cap.
    async fn retrieve(
        &self,
        query_text: &str,
        max_results: u32,
    ) -> Result<OpeningsResponse, RetrievalError>;
}

enum CredentialSource {
    /// Explicit access-key/secret pair from configuration.
    Static(Credentials),
    /// Ambient chain (profile, instance role, SSO, ...).
    Ambient(Arc<dyn ProvideCredentials>),
}

/// Client bound to one knowledge base for the life of the process.
///
/// Constructed once at startup and shared behind `Arc`; each call carries
/// its own request and response data, so concurrent use is safe.
pub struct KnowledgeBaseClient {
    http: reqwest::Client,
    region: String,
    knowledge_base_id: String,
    endpoint: String,
    credentials: CredentialSource,
}

impl KnowledgeBaseClient {
    /// Build an authenticated client handle bound to the configured
    /// knowledge base. Fails fast when the HTTP handle cannot be built or
    /// no credentials are resolvable.
    pub async fn new(settings: &Settings) -> crate::Result<Self> {
        let credentials = if settings.has_static_credentials() {
            // has_static_credentials guarantees both halves are present
            let access_key_id = settings.access_key_id.clone().unwrap_or_default();
            let secret_access_key = settings.secret_access_key.clone().unwrap_or_default();
            CredentialSource::Static(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "static-env",
            ))
        } else {
            let aws_config = aws_config::defaults(BehaviorVersion::latest())
                .region(aws_config::Region::new(settings.aws_region.clone()))
                .load()
                .await;
            let provider = aws_config.credentials_provider().ok_or_else(|| {
                Error::ClientConstruction(
                    "no AWS credentials available from the ambient environment".into(),
                )
            })?;
            CredentialSource::Ambient(Arc::from(provider))
        };

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::ClientConstruction(format!("failed to build HTTP client: {e}")))?;

        info!(
            knowledge_base_id = %settings.knowledge_base_id,
            region = %settings.aws_region,
            "initialized knowledge-base client"
        );

        Ok(Self {
            http,
            region: settings.aws_region.clone(),
            knowledge_base_id: settings.knowledge_base_id.clone(),
            endpoint: settings.endpoint(),
            credentials,
        })
    }

    /// The knowledge-base identifier this client is bound to.
    pub fn knowledge_base_id(&self) -> &str {
        &self.knowledge_base_id
    }

    fn retrieve_url(&self) -> String {
        format!(
            "{}/knowledgebases/{}/retrieve",
            self.endpoint,
            urlencoding::encode(&self.knowledge_base_id)
        )
    }

    async fn credentials(&self) -> Result<Credentials, RetrievalError> {
        match &self.credentials {
            CredentialSource::Static(credentials) => Ok(credentials.clone()),
            CredentialSource::Ambient(provider) => provider
                .provide_credentials()
                .await
                .map_err(|e| RetrievalError::Transport(format!("credential resolution: {e}"))),
        }
    }

    async fn execute_retrieve(
        &self,
        query_text: &str,
        max_results: u32,
    ) -> Result<OpeningsResponse, RetrievalError> {
        info!(query = %query_text, "retrieving job openings");

        let url = self.retrieve_url();
        let body = serde_json::json!({
            "retrievalQuery": { "text": query_text },
            "retrievalConfiguration": {
                "vectorSearchConfiguration": { "numberOfResults": max_results },
            },
        });
        let body_bytes =
            serde_json::to_vec(&body).map_err(|e| RetrievalError::Unclassified(e.to_string()))?;

        let credentials = self.credentials().await?;
        let signed_headers =
            sign::sign_request(&credentials, &self.region, "POST", &url, &body_bytes)?;

        let mut request = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(body_bytes);
        for (name, value) in signed_headers {
            request = request.header(&name, &value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RetrievalError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(classify_service_error(response).await);
        }

        let document: Value = response
            .json()
            .await
            .map_err(|e| RetrievalError::Transport(format!("failed to decode response: {e}")))?;

        let results = parse::parse_retrieval_results(&document);
        info!(results = results.len(), "retrieval complete");

        Ok(OpeningsResponse::new(results))
    }
}

#[async_trait]
impl OpeningsRetriever for KnowledgeBaseClient {
    async fn retrieve(
        &self,
        query_text: &str,
        max_results: u32,
    ) -> Result<OpeningsResponse, RetrievalError> {
        let result = self.execute_retrieve(query_text, max_results).await;
        if let Err(ref e) = result {
            error!(error = %e, "retrieval failed");
        }
        result
    }
}

/// Turn a non-success service response into a `ServiceRejected` error.
///
/// The error code comes from the `x-amzn-errortype` header when present,
/// falling back to the body's `__type` field, then `"Unknown"`.
async fn classify_service_error(response: reqwest::Response) -> RetrievalError {
    let header_code = response
        .headers()
        .get("x-amzn-errortype")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(':').next().unwrap_or(v).to_string());

    let body = response.text().await.unwrap_or_default();
    let parsed: Option<Value> = serde_json::from_str(&body).ok();

    let code = header_code
        .or_else(|| {
            parsed
                .as_ref()
                .and_then(|v| v.get("__type"))
                .and_then(Value::as_str)
                // __type is often a shape id like "namespace#ErrorName"
                .map(|t| t.rsplit('#').next().unwrap_or(t).to_string())
        })
        .unwrap_or_else(|| "Unknown".to_string());

    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("Message")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(body);

    RetrievalError::ServiceRejected { code, message }
}
