//! Blocking HTTP client for the recipe search endpoint.

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::error::{LadleError, Result};
use crate::model::SearchPage;
use crate::state::{FilterField, SearchState};

/// Default deployment of the backing API.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api/recipes";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the recipe API; `/search` is appended per request.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Issues search requests against the recipe API.
///
/// Cheap to clone; clones share the underlying connection pool, which is what
/// lets each background fetch run on its own thread.
#[derive(Debug, Clone)]
pub struct RecipeClient {
    http: Client,
    config: ClientConfig,
}

impl RecipeClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    /// Build the search URL for the given state. Every filter key is always
    /// present in the query, empty when unset, matching what the backend
    /// expects to receive.
    pub fn search_url(&self, state: &SearchState) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| LadleError::InvalidBaseUrl(self.config.base_url.clone(), e))?;
        url.path_segments_mut()
            .map_err(|_| LadleError::BaseUrlNotABase(self.config.base_url.clone()))?
            .push("search");

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &state.page.to_string());
            pairs.append_pair("limit", &state.per_page.to_string());
            for field in FilterField::ALL {
                pairs.append_pair(field.param(), state.filter(field));
            }
        }

        Ok(url)
    }

    /// Fetch one page of results for the given state.
    pub fn search(&self, state: &SearchState) -> Result<SearchPage> {
        let url = self.search_url(state)?;
        debug!(url = %url, "issuing recipe search");
        let page = self
            .http
            .get(url)
            .send()?
            .error_for_status()?
            .json::<SearchPage>()?;
        debug!(total = page.total, page = page.page, "search completed");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RecipeClient {
        RecipeClient::new(ClientConfig::default()).unwrap()
    }

    #[test]
    fn url_carries_every_filter_param() {
        let url = client().search_url(&SearchState::default()).unwrap();
        assert_eq!(url.path(), "/api/recipes/search");
        assert_eq!(
            url.query().unwrap(),
            "page=1&limit=15&title=&cuisine=&rating=&total_time=&serves="
        );
    }

    #[test]
    fn url_includes_set_filters() {
        let mut state = SearchState::default();
        state.set_filter(FilterField::Cuisine, "Italian");
        let url = client().search_url(&state).unwrap();
        let query = url.query().unwrap();

        assert!(query.contains("cuisine=Italian"));
        assert!(query.contains("page=1"));
        assert!(query.contains("limit=15"));
        assert!(query.contains("title="));
        assert!(query.contains("rating="));
        assert!(query.contains("total_time="));
        assert!(query.contains("serves="));
    }

    #[test]
    fn url_tracks_pagination_state() {
        let mut state = SearchState::default();
        state.set_page_size(50);
        state.step_page(1);
        state.step_page(1);
        let url = client().search_url(&state).unwrap();

        assert!(url.query().unwrap().contains("page=3"));
        assert!(url.query().unwrap().contains("limit=50"));
    }

    #[test]
    fn filter_values_are_percent_encoded() {
        let mut state = SearchState::default();
        state.set_filter(FilterField::Title, "chicken & rice");
        let url = client().search_url(&state).unwrap();
        assert!(url.query().unwrap().contains("title=chicken+%26+rice"));
    }

    #[test]
    fn garbage_base_url_is_rejected() {
        let client = RecipeClient::new(ClientConfig {
            base_url: "not a url".to_string(),
        })
        .unwrap();
        let err = client.search_url(&SearchState::default()).unwrap_err();
        assert!(err.is_fetch_failure());
    }
}
