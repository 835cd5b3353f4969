//! Builds the raw Indian and global candidate pools for one request.

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{MovieRecord, Origin, PreferenceSet, INDIAN_LANGUAGES},
    services::providers::{DateWindow, DiscoverFilters, MovieDataProvider},
};

/// Regions fetched for the global pool; distinct markets for variety
const GLOBAL_REGIONS: [&str; 5] = ["US", "KR", "JP", "FR", "ES"];

/// Pages fetched per language or region
const DISCOVER_PAGES: u32 = 2;

/// Pages fetched for the actor boost
const ACTOR_PAGES: u32 = 3;

/// Discovery vote-count floor; keeps very new low-signal entries out
const VOTE_COUNT_FLOOR: u32 = 50;

/// Gathers candidate movies from the provider, partitioned into an Indian
/// pool and a global pool.
///
/// Fetch order is language-major then page-major, with any actor boost
/// appended last. Pools come back raw: duplicates survive until sampling.
/// Any provider failure aborts the whole build, since a partial pool would
/// misrepresent the requested mix.
pub struct PoolBuilder {
    provider: Arc<dyn MovieDataProvider>,
}

impl PoolBuilder {
    pub fn new(provider: Arc<dyn MovieDataProvider>) -> Self {
        Self { provider }
    }

    /// Builds `(indian_pool, global_pool)` for the given preferences
    pub async fn build(
        &self,
        prefs: &PreferenceSet,
        window: DateWindow,
        genre_id: Option<u64>,
    ) -> AppResult<(Vec<MovieRecord>, Vec<MovieRecord>)> {
        let mut indian_pool = Vec::new();
        for language in INDIAN_LANGUAGES {
            for page in 1..=DISCOVER_PAGES {
                let filters = DiscoverFilters {
                    window,
                    page,
                    genre_id,
                    original_language: Some(language.to_string()),
                    region: None,
                    with_cast: None,
                    vote_count_floor: VOTE_COUNT_FLOOR,
                };
                indian_pool.extend(self.provider.discover(&filters).await?);
            }
        }

        let mut global_pool = Vec::new();
        for region in GLOBAL_REGIONS {
            for page in 1..=DISCOVER_PAGES {
                let filters = DiscoverFilters {
                    window,
                    page,
                    genre_id,
                    original_language: None,
                    region: Some(region.to_string()),
                    with_cast: None,
                    vote_count_floor: VOTE_COUNT_FLOOR,
                };
                global_pool.extend(self.provider.discover(&filters).await?);
            }
        }
        // Regions only approximate "non-Indian"; drop Indian-language
        // records from the global pool explicitly
        global_pool.retain(|movie| movie.origin() == Origin::Global);

        if !prefs.fav_actor.trim().is_empty() {
            self.boost_by_actor(&prefs.fav_actor, window, &mut indian_pool, &mut global_pool)
                .await?;
        }

        Ok((indian_pool, global_pool))
    }

    /// Appends the favorite actor's filmography to both pools, partitioned
    /// by language. An unknown name contributes nothing.
    async fn boost_by_actor(
        &self,
        actor: &str,
        window: DateWindow,
        indian_pool: &mut Vec<MovieRecord>,
        global_pool: &mut Vec<MovieRecord>,
    ) -> AppResult<()> {
        let Some(person_id) = self.provider.search_person(actor).await? else {
            tracing::debug!(actor = %actor, "No person match; skipping actor boost");
            return Ok(());
        };

        let actor_movies = self
            .provider
            .movies_by_person(person_id, window, ACTOR_PAGES)
            .await?;

        let (indian, global): (Vec<_>, Vec<_>) = actor_movies
            .into_iter()
            .partition(|movie| movie.origin() == Origin::Indian);

        tracing::debug!(
            person_id,
            indian = indian.len(),
            global = global.len(),
            "Actor boost applied"
        );

        indian_pool.extend(indian);
        global_pool.extend(global);
        Ok(())
    }
}
