use craftmeta_core::{Executor, HeaderMap, HeaderValue, url_with_segments};
use reqwest::header::ACCEPT;

use crate::config::CurseForgeConfig;
use crate::error::CurseForgeError;
use crate::models::{Mod, ModResponse, ModsSearchResponse};
use crate::search::{ModLoader, SearchRequest};

const API_KEY_HEADER: &str = "x-api-key";

/// Client for the CurseForge catalog API.
///
/// Every request carries the API key from the config. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct CurseForgeClient {
    config: CurseForgeConfig,
    executor: Executor,
    headers: HeaderMap,
}

impl CurseForgeClient {
    /// Build a client. An empty API key is rejected up front.
    pub fn new(config: CurseForgeConfig) -> Result<Self, CurseForgeError> {
        if config.api_key.trim().is_empty() {
            return Err(CurseForgeError::MissingApiKey);
        }

        let mut key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|e| CurseForgeError::Config(format!("API key is not a valid header: {}", e)))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, key);

        let executor = Executor::new(&config.transport)?;
        Ok(Self {
            config,
            executor,
            headers,
        })
    }

    pub fn config(&self) -> &CurseForgeConfig {
        &self.config
    }

    /// Run a search. The request is validated before anything is sent.
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<ModsSearchResponse, CurseForgeError> {
        request.validate()?;

        let mut url = url_with_segments(&self.config.base_url, &["mods", "search"])?;
        let params = request.to_params();
        log::trace!("Search params: {:?}", params);
        url.query_pairs_mut().extend_pairs(params);

        let response: ModsSearchResponse = self.executor.get_json(url, &self.headers).await?;
        log::debug!(
            "Search returned {} of {} results",
            response.pagination.result_count,
            response.pagination.total_count
        );
        Ok(response)
    }

    pub async fn search_modpacks(
        &self,
        filter: &str,
    ) -> Result<ModsSearchResponse, CurseForgeError> {
        self.search(&SearchRequest::modpacks().search_filter(filter))
            .await
    }

    pub async fn search_mods(
        &self,
        filter: &str,
        loader: Option<ModLoader>,
    ) -> Result<ModsSearchResponse, CurseForgeError> {
        let mut request = SearchRequest::mods().search_filter(filter);
        if let Some(loader) = loader {
            request = request.mod_loader(loader);
        }
        self.search(&request).await
    }

    /// The request for the page after `response`, if there is one.
    pub fn next_page(
        request: &SearchRequest,
        response: &ModsSearchResponse,
    ) -> Option<SearchRequest> {
        response
            .pagination
            .next_index()
            .map(|index| request.page(index))
    }

    /// Fetch the page after `response`. `None` when it was the last page.
    pub async fn search_next_page(
        &self,
        request: &SearchRequest,
        response: &ModsSearchResponse,
    ) -> Result<Option<ModsSearchResponse>, CurseForgeError> {
        match Self::next_page(request, response) {
            Some(next) => self.search(&next).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn fetch_mod(&self, mod_id: u64) -> Result<Mod, CurseForgeError> {
        let url = url_with_segments(&self.config.base_url, &["mods", &mod_id.to_string()])?;
        let response: ModResponse = self.executor.get_json(url, &self.headers).await?;
        Ok(response.data)
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
