//! HTTP implementation of [`DataFetcher`] against the public PokeAPI.

use super::wire::{self, ResourceList};
use super::{CategoryIndex, DataFetcher};
use crate::config::CatalogConfig;
use crate::detail::PokemonDetail;
use crate::errors::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;
use schema::{Category, PokemonEntry};
use std::time::Duration;
use tracing::debug;

/// Index endpoints are paged; this comfortably covers every category.
const INDEX_PAGE_LIMIT: usize = 100;

pub struct PokeApiClient {
    http: Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(config: &CatalogConfig) -> FetchResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().map_err(|source| FetchError::Http {
            url: config.api_root().to_string(),
            source,
        })?;

        Ok(Self {
            http,
            base_url: config.api_root().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GETs `url` and returns the raw body of a successful response.
    async fn get_body(&self, url: &str) -> FetchResult<Vec<u8>> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl DataFetcher for PokeApiClient {
    async fn fetch_catalog(&self, limit: usize) -> FetchResult<Vec<PokemonEntry>> {
        let url = self.endpoint(&format!("pokemon?limit={}&offset=0", limit));
        let body = self.get_body(&url).await?;
        let list: ResourceList = wire::decode(&url, &body)?;
        wire::catalog_from_list(list)
    }

    async fn fetch_category_index(&self, category: Category) -> FetchResult<CategoryIndex> {
        let url = self.endpoint(&format!(
            "{}?limit={}",
            category.api_resource(),
            INDEX_PAGE_LIMIT
        ));
        let body = self.get_body(&url).await?;
        let list: ResourceList = wire::decode(&url, &body)?;
        Ok(list
            .results
            .into_iter()
            .map(|resource| (resource.name, resource.url))
            .collect())
    }

    async fn fetch_category_members(
        &self,
        category: Category,
        source_url: &str,
    ) -> FetchResult<Vec<String>> {
        let body = self.get_body(source_url).await?;
        wire::members_from_body(category, source_url, &body)
    }

    async fn fetch_entity_detail(&self, url: &str) -> FetchResult<PokemonDetail> {
        let body = self.get_body(url).await?;
        wire::detail_from_body(url, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = CatalogConfig {
            api_base_url: "https://pokeapi.co/api/v2/".to_string(),
            ..CatalogConfig::default()
        };
        let client = PokeApiClient::new(&config).unwrap();
        assert_eq!(client.endpoint("type"), "https://pokeapi.co/api/v2/type");
    }
}
