//! Pokemon Catalog MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp)
//! that exposes catalog search, filtering and paging as tools.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use pokemon_catalog::logging::init_tracing;
use pokemon_catalog::mcp_interface::*;
use pokemon_catalog::{
    CatalogConfig, CatalogError, CatalogSession, FilterSelection, GenderFilter, PokeApiClient,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tokio::sync::OnceCell;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PokemonCatalogService {
    tool_router: ToolRouter<PokemonCatalogService>,
    config: CatalogConfig,
    session: Arc<OnceCell<CatalogSession>>,
    selection: Arc<Mutex<FilterSelection>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchCatalogRequest {
    #[schemars(description = "Text matched against names and pokedex numbers; empty clears it")]
    pub query: Option<String>,
    #[schemars(description = "Keep Pokemon of ANY of these types (e.g. [\"fire\", \"water\"]); empty clears")]
    pub types: Option<Vec<String>>,
    #[schemars(description = "Keep Pokemon of ANY of these colors; empty clears")]
    pub colors: Option<Vec<String>>,
    #[schemars(description = "Single gender value such as 'female', or 'all'")]
    pub gender: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FilterOptionsRequest {
    #[schemars(description = "Filter category: 'type', 'color' or 'gender'")]
    pub category: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupPokemonRequest {
    #[schemars(description = "Pokemon name or pokedex number")]
    pub name_or_id: String,
}

fn internal_error(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(message),
        data: None,
    }
}

#[tool_router]
impl PokemonCatalogService {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
            session: Arc::new(OnceCell::new()),
            selection: Arc::new(Mutex::new(FilterSelection::cleared())),
        }
    }

    /// Loads the catalog on first use; a failed load is retried by the next call.
    async fn session(&self) -> Result<&CatalogSession, McpError> {
        self.session
            .get_or_try_init(|| async {
                let client =
                    PokeApiClient::new(&self.config).map_err(CatalogError::Initialization)?;
                CatalogSession::initialize(Arc::new(client), &self.config).await
            })
            .await
            .map_err(|e| internal_error(e.to_string()))
    }

    fn current_selection(&self) -> FilterSelection {
        self.selection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[tool(description = "Search and filter the Pokemon catalog; returns the first batch of matches")]
    async fn search_catalog(
        &self,
        Parameters(request): Parameters<SearchCatalogRequest>,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session().await?;
        let selection = {
            let mut selection = self.selection.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(query) = request.query {
                selection.query = query;
            }
            if let Some(types) = request.types {
                selection.types = FilterSelection::cleared().with_types(types).types;
            }
            if let Some(colors) = request.colors {
                selection.colors = FilterSelection::cleared().with_colors(colors).colors;
            }
            if let Some(gender) = request.gender {
                selection.gender = GenderFilter::from_input(&gender);
            }
            selection.clone()
        };

        let mut text = selection_display(&selection);
        text.push('\n');
        text.push_str(&refresh_results(session, &selection).await);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Show the next batch of the current search results")]
    async fn load_more(&self) -> Result<CallToolResult, McpError> {
        let session = self.session().await?;
        Ok(CallToolResult::success(vec![Content::text(
            load_more_display(session),
        )]))
    }

    #[tool(description = "Clear every filter and show the first batch of the full catalog")]
    async fn reset_filters(&self) -> Result<CallToolResult, McpError> {
        let session = self.session().await?;
        *self.selection.lock().unwrap_or_else(PoisonError::into_inner) = FilterSelection::cleared();
        Ok(CallToolResult::success(vec![Content::text(
            reset_display(session).await,
        )]))
    }

    #[tool(description = "Describe the filters currently applied")]
    async fn get_filters(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            selection_display(&self.current_selection()),
        )]))
    }

    #[tool(description = "List the values available for a filter category")]
    async fn list_filter_options(
        &self,
        Parameters(request): Parameters<FilterOptionsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let category = parse_category(&request.category).map_err(|e| McpError {
            code: ErrorCode(-32602),
            message: Cow::from(e.to_string()),
            data: None,
        })?;
        let session = self.session().await?;
        Ok(CallToolResult::success(vec![Content::text(
            filter_options_display(session, category),
        )]))
    }

    #[tool(description = "Look up detailed information about a Pokemon")]
    async fn lookup_pokemon(
        &self,
        Parameters(request): Parameters<LookupPokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let session = self.session().await?;
        let text = lookup_pokemon_display(session, &request.name_or_id).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for PokemonCatalogService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("info");
    info!("Pokemon Catalog MCP Server starting...");

    let config_path = std::env::var_os("POKEMON_CATALOG_CONFIG").map(PathBuf::from);
    let config = CatalogConfig::load(config_path.as_deref())?;
    let service = PokemonCatalogService::new(config);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    info!("Server running, waiting for shutdown...");
    let quit_reason = server.waiting().await?;

    info!(?quit_reason, "Pokemon Catalog MCP Server exiting");
    Ok(())
}
