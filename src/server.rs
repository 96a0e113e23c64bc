//! MCP tool boundary.
//!
//! Exposes the single `get_job_openings` tool over the MCP protocol. This
//! boundary never leaks internals to the caller: retrieval failures become
//! a fixed user-safe string, and only the diagnostic stream sees the cause.
//! Validation failures are the one deliberate exception — they surface as
//! structured `invalid_params` protocol errors so bad input fails loud.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::format::format_openings_response;
use crate::models::OpeningQuery;
use crate::retrieval::OpeningsRetriever;

/// Returned for any retrieval failure; the cause is only logged.
pub const RETRIEVAL_FAILURE_MESSAGE: &str =
    "Failed to retrieve job openings. Please try again later.";

/// Returned for failures outside the known taxonomy.
pub const UNEXPECTED_FAILURE_MESSAGE: &str =
    "An unexpected error occurred. Please try again later.";

/// Arguments of the `get_job_openings` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetJobOpeningsArgs {
    /// Search query for job openings (e.g. "software engineer").
    pub query_text: String,
    /// Maximum number of results to return (1-100, default 10).
    pub max_results: Option<u32>,
}

/// MCP server with one retrieval tool.
///
/// Holds the retriever behind `Arc<dyn ...>` so every session shares the
/// one long-lived client handle and tests can substitute a double.
#[derive(Clone)]
pub struct OpeningsServer {
    retriever: Arc<dyn OpeningsRetriever>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl OpeningsServer {
    pub fn new(retriever: Arc<dyn OpeningsRetriever>) -> Self {
        Self {
            retriever,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the job-openings knowledge base for openings matching a text query. Returns matching openings with relevance scores, metadata, and source information."
    )]
    async fn get_job_openings(
        &self,
        Parameters(args): Parameters<GetJobOpeningsArgs>,
    ) -> Result<CallToolResult, McpError> {
        // Validation boundary: rejected queries never reach the network.
        let query = match OpeningQuery::new(args.query_text, args.max_results) {
            Ok(query) => query,
            Err(e) => {
                warn!(error = %e, "rejected query");
                return Err(McpError::invalid_params(e.to_string(), None));
            }
        };

        info!(
            query = %query.query_text(),
            max_results = query.max_results(),
            "processing query"
        );

        match self
            .retriever
            .retrieve(query.query_text(), query.max_results())
            .await
            .map_err(crate::Error::from)
        {
            Ok(response) => Ok(CallToolResult::success(vec![Content::text(
                format_openings_response(&response),
            )])),
            Err(e) => {
                error!(error = %e, "failed to retrieve job openings");
                Ok(CallToolResult::success(vec![Content::text(
                    user_safe_message(&e),
                )]))
            }
        }
    }
}

/// Fixed strings only; the underlying cause is logged, never returned.
fn user_safe_message(error: &crate::Error) -> &'static str {
    match error {
        crate::Error::Retrieval(_) => RETRIEVAL_FAILURE_MESSAGE,
        _ => UNEXPECTED_FAILURE_MESSAGE,
    }
}

#[tool_handler]
impl ServerHandler for OpeningsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Job-openings retrieval backed by an AWS Bedrock Knowledge Base. \
                 Use get_job_openings with a free-text query (and an optional \
                 max_results between 1 and 100) to find matching openings."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}
