//! # openings-mcp
//!
//! MCP stdio server that retrieves job openings from an AWS Bedrock
//! Knowledge Base.
//!
//! The server exposes a single tool, `get_job_openings`, which runs a
//! retrieval-only (no generation) similarity search against the configured
//! knowledge base and returns a formatted transcript of the matches.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use openings_mcp::{KnowledgeBaseClient, OpeningsServer, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), openings_mcp::Error> {
//!     let settings = Settings::from_env()?;
//!     let client = Arc::new(KnowledgeBaseClient::new(&settings).await?);
//!     let _server = OpeningsServer::new(client);
//!     // serve over stdio, see src/main.rs
//!     Ok(())
//! }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod format;
pub mod models;
pub mod retrieval;
pub mod server;

// Re-exports for convenience
pub use config::Settings;
pub use format::format_openings_response;
pub use models::{OpeningQuery, OpeningResult, OpeningsResponse, SourceMetadata, ValidationError};
pub use retrieval::{KnowledgeBaseClient, OpeningsRetriever, RetrievalError};
pub use server::OpeningsServer;

/// Error type for openings-mcp operations.
///
/// One variant per failure class, so callers pattern-match instead of
/// downcasting. `Config` and `ClientConstruction` are fatal at startup;
/// `Validation` and `Retrieval` are local to one tool invocation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Required configuration missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The knowledge-base client handle could not be built.
    #[error("Client construction failed: {0}")]
    ClientConstruction(String),

    /// Query parameters violate the query envelope's constraints.
    #[error("Invalid query: {0}")]
    Validation(#[from] models::ValidationError),

    /// The retrieve call failed after validation passed.
    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] retrieval::RetrievalError),

    /// The MCP transport failed to start or shut down cleanly.
    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// Whether this error prevents any invocation from succeeding until
    /// the process is reconfigured and restarted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_) | Error::ClientConstruction(_))
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
