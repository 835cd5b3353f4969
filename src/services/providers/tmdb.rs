/// TMDB API provider
///
/// Talks to The Movie Database v3 API:
/// - Discovery: /discover/movie (popularity-sorted, filterable by language,
///   region, genre, cast member, release window, vote count)
/// - Person search: /search/person
/// - Genre catalog: /genre/movie/list
///
/// The API key travels as a query parameter on every call. Non-success
/// responses surface TMDB's `status_message` when the body parses, else a
/// snippet of the raw body.
use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
    services::providers::{DiscoverFilters, MovieDataProvider},
};

const REQUEST_TIMEOUT_SECS: u64 = 20;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a provider, rejecting an unconfigured API key before any
    /// request is made
    pub fn new(api_key: String, api_url: String) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::MissingCredential);
        }

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    /// GET a TMDB path with the API key attached, decoding `T` on success
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TmdbErrorBody>(&body)
                .map(|e| e.status_message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, message
            )));
        }

        Ok(response.json().await?)
    }
}

/// Error payload TMDB returns alongside non-success statuses
#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: String,
}

#[derive(Debug, Deserialize)]
struct DiscoverPage {
    #[serde(default)]
    results: Vec<MovieRecord>,
}

#[derive(Debug, Deserialize)]
struct PersonSearchPage {
    #[serde(default)]
    results: Vec<PersonResult>,
}

#[derive(Debug, Deserialize)]
struct PersonResult {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct Genre {
    id: u64,
    name: String,
}

#[async_trait::async_trait]
impl MovieDataProvider for TmdbProvider {
    async fn discover(&self, filters: &DiscoverFilters) -> AppResult<Vec<MovieRecord>> {
        let mut params = vec![
            ("include_adult", "false".to_string()),
            ("include_video", "false".to_string()),
            ("language", "en-US".to_string()),
            ("sort_by", "popularity.desc".to_string()),
            ("page", filters.page.to_string()),
            (
                "primary_release_date.gte",
                filters.window.start.format("%Y-%m-%d").to_string(),
            ),
            (
                "primary_release_date.lte",
                filters.window.end.format("%Y-%m-%d").to_string(),
            ),
            ("vote_count.gte", filters.vote_count_floor.to_string()),
        ];
        if let Some(genre_id) = filters.genre_id {
            params.push(("with_genres", genre_id.to_string()));
        }
        if let Some(language) = &filters.original_language {
            params.push(("with_original_language", language.clone()));
        }
        if let Some(region) = &filters.region {
            params.push(("region", region.clone()));
        }
        if let Some(person_id) = filters.with_cast {
            params.push(("with_cast", person_id.to_string()));
        }

        let page: DiscoverPage = self.get_json("/discover/movie", &params).await?;

        tracing::debug!(
            page = filters.page,
            results = page.results.len(),
            provider = "tmdb",
            "Discovery page fetched"
        );

        Ok(page.results)
    }

    async fn search_person(&self, name: &str) -> AppResult<Option<u64>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let params = [
            ("query", name.to_string()),
            ("include_adult", "false".to_string()),
        ];
        let page: PersonSearchPage = self.get_json("/search/person", &params).await?;

        // First match wins; no match is not an error
        Ok(page.results.first().map(|person| person.id))
    }

    async fn genre_catalog(&self) -> AppResult<HashMap<String, u64>> {
        let params = [("language", "en-US".to_string())];
        let list: GenreList = self.get_json("/genre/movie/list", &params).await?;

        Ok(list
            .genres
            .into_iter()
            .map(|genre| (genre.name.to_lowercase(), genre.id))
            .collect())
    }
}
