//! MCP stdio server entrypoint.
//!
//! Wires configuration, the knowledge-base client, and the tool server
//! together. All diagnostics go to stderr; stdout belongs to the MCP
//! transport.

use std::sync::Arc;

use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::info;
use tracing_subscriber::EnvFilter;

use openings_mcp::{Error, KnowledgeBaseClient, OpeningsServer, Settings};

#[tokio::main]
async fn main() -> openings_mcp::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("starting job-openings MCP server");

    // Config and client-construction failures are fatal: propagate and
    // exit rather than serving a tool that can never succeed.
    let settings = Settings::from_env()?;
    let client = Arc::new(KnowledgeBaseClient::new(&settings).await?);
    let server = OpeningsServer::new(client);

    let running = server
        .serve(stdio())
        .await
        .map_err(|e| Error::Server(e.to_string()))?;

    running
        .waiting()
        .await
        .map_err(|e| Error::Server(e.to_string()))?;

    info!("shutting down");
    Ok(())
}
