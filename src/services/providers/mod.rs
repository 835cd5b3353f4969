/// Movie metadata provider abstraction
///
/// The recommendation core talks to the outside world only through this
/// trait, so the data source can be swapped (TMDB today) and stubbed in
/// tests without touching the pool or sampling logic.
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::{error::AppResult, models::MovieRecord};

pub mod tmdb;

/// Vote-count floor for person-restricted discovery; actor-specific
/// catalogs are small, so the open-discovery floor would starve them
const PERSON_VOTE_COUNT_FLOOR: u32 = 20;

/// Inclusive release-date window applied to every discovery call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The window every recommendation request uses: today minus 20 years
    /// through today
    pub fn last_20_years() -> Self {
        let end = Utc::now().date_naive();
        let start = end
            .with_year(end.year() - 20)
            // Feb 29 may have no counterpart 20 years back
            .unwrap_or(end - Duration::days(7305));
        Self { start, end }
    }
}

/// Filters for one page of popularity-sorted discovery results
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverFilters {
    pub window: DateWindow,
    pub page: u32,
    pub genre_id: Option<u64>,
    pub original_language: Option<String>,
    pub region: Option<String>,
    pub with_cast: Option<u64>,
    pub vote_count_floor: u32,
}

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieDataProvider: Send + Sync {
    /// One page of discovery results matching the filters
    async fn discover(&self, filters: &DiscoverFilters) -> AppResult<Vec<MovieRecord>>;

    /// First matching person id for a name, if any
    async fn search_person(&self, name: &str) -> AppResult<Option<u64>>;

    /// Lowercase genre name to genre id, from the provider's catalog
    async fn genre_catalog(&self) -> AppResult<HashMap<String, u64>>;

    /// Movies with the given person in the cast, within the window
    ///
    /// Default implementation pages through discovery restricted to the
    /// person; providers with a dedicated credits endpoint can override.
    async fn movies_by_person(
        &self,
        person_id: u64,
        window: DateWindow,
        pages: u32,
    ) -> AppResult<Vec<MovieRecord>> {
        let mut movies = Vec::new();
        for page in 1..=pages {
            let filters = DiscoverFilters {
                window,
                page,
                genre_id: None,
                original_language: None,
                region: None,
                with_cast: Some(person_id),
                vote_count_floor: PERSON_VOTE_COUNT_FLOOR,
            };
            movies.extend(self.discover(&filters).await?);
        }
        Ok(movies)
    }
}
