//! Environment configuration.
//!
//! Settings are read once at startup. Environment variables are treated as
//! immutable at runtime; there is no reload path.

use std::env;
use std::fmt;

use crate::Error;

/// Validated application settings.
///
/// Required: `AWS_REGION`, `BEDROCK_KNOWLEDGE_BASE_ID`. The static
/// credential pair is optional — when either half is missing the client
/// falls back to ambient credential resolution (profile, instance role,
/// SSO, etc.). `BEDROCK_ENDPOINT_URL` overrides the service endpoint for
/// gateways and tests.
#[derive(Clone)]
pub struct Settings {
    pub aws_region: String,
    pub knowledge_base_id: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub endpoint_url: Option<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("aws_region", &self.aws_region)
            .field("knowledge_base_id", &self.knowledge_base_id)
            .field("has_static_credentials", &self.has_static_credentials())
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl Settings {
    /// Load settings from environment variables.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_values(
            env_opt("AWS_REGION"),
            env_opt("BEDROCK_KNOWLEDGE_BASE_ID"),
            env_opt("AWS_ACCESS_KEY_ID"),
            env_opt("AWS_SECRET_ACCESS_KEY"),
            env_opt("BEDROCK_ENDPOINT_URL"),
        )
    }

    /// Validate raw values into settings.
    pub fn from_values(
        aws_region: Option<String>,
        knowledge_base_id: Option<String>,
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
        endpoint_url: Option<String>,
    ) -> crate::Result<Self> {
        let aws_region =
            aws_region.ok_or_else(|| Error::Config("AWS_REGION is not set".into()))?;
        if !is_plausible_region(&aws_region) {
            return Err(Error::Config(format!(
                "AWS_REGION '{aws_region}' is not a valid region identifier"
            )));
        }

        let knowledge_base_id = knowledge_base_id
            .ok_or_else(|| Error::Config("BEDROCK_KNOWLEDGE_BASE_ID is not set".into()))?;

        Ok(Self {
            aws_region,
            knowledge_base_id,
            access_key_id,
            secret_access_key,
            endpoint_url,
        })
    }

    /// Whether an explicit access-key/secret pair was provided.
    ///
    /// Both halves are required for the pair to take effect.
    pub fn has_static_credentials(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }

    /// Service endpoint for the bound region, honoring the override.
    pub fn endpoint(&self) -> String {
        self.endpoint_url.clone().unwrap_or_else(|| {
            format!(
                "https://bedrock-agent-runtime.{}.amazonaws.com",
                self.aws_region
            )
        })
    }
}

/// Read an environment variable, treating blank values as absent.
fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Region identifiers are lowercase alphanumerics and hyphens. Anything
/// else would produce a broken endpoint host.
fn is_plausible_region(region: &str) -> bool {
    !region.is_empty()
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(region: &str, kb: &str) -> crate::Result<Settings> {
        Settings::from_values(Some(region.into()), Some(kb.into()), None, None, None)
    }

    #[test]
    fn test_requires_region_and_kb_id() {
        let err = Settings::from_values(None, Some("KB123".into()), None, None, None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("AWS_REGION"));

        let err = Settings::from_values(Some("us-east-1".into()), None, None, None, None)
            .unwrap_err();
        assert!(err.to_string().contains("BEDROCK_KNOWLEDGE_BASE_ID"));
    }

    #[test]
    fn test_rejects_malformed_region() {
        assert!(settings("us east 1", "KB123").is_err());
        assert!(settings("US-EAST-1", "KB123").is_err());
        assert!(settings("us-east-1", "KB123").is_ok());
    }

    #[test]
    fn test_default_endpoint_from_region() {
        let s = settings("eu-west-2", "KB123").unwrap();
        assert_eq!(
            s.endpoint(),
            "https://bedrock-agent-runtime.eu-west-2.amazonaws.com"
        );
    }

    #[test]
    fn test_endpoint_override_wins() {
        let s = Settings::from_values(
            Some("us-east-1".into()),
            Some("KB123".into()),
            None,
            None,
            Some("http://127.0.0.1:9999".into()),
        )
        .unwrap();
        assert_eq!(s.endpoint(), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_credential_pair_requires_both_halves() {
        let s = Settings::from_values(
            Some("us-east-1".into()),
            Some("KB123".into()),
            Some("AKIAEXAMPLE".into()),
            None,
            None,
        )
        .unwrap();
        assert!(!s.has_static_credentials());
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let s = Settings::from_values(
            Some("us-east-1".into()),
            Some("KB123".into()),
            Some("AKIAEXAMPLE".into()),
            Some("super-secret".into()),
            None,
        )
        .unwrap();
        let rendered = format!("{s:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("has_static_credentials: true"));
    }
}
