//! Assembles the final recommendation list.
//!
//! Composition: resolve genre and mix ratio, build the candidate pools,
//! year-balance each pool's sample, then merge Indian-first and cap.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    error::AppResult,
    models::{MovieRecord, PreferenceSet},
    services::{
        dedup::dedupe_by_id,
        mix,
        pools::PoolBuilder,
        providers::{DateWindow, MovieDataProvider},
        sampler::balanced_sample_by_year,
    },
};

/// Produces ordered, capped recommendation lists from a preference set
pub struct Recommender {
    provider: Arc<dyn MovieDataProvider>,
    pools: PoolBuilder,
}

impl Recommender {
    pub fn new(provider: Arc<dyn MovieDataProvider>) -> Self {
        Self {
            pools: PoolBuilder::new(provider.clone()),
            provider,
        }
    }

    /// Recommends up to `count` unique movies, Indian picks first
    pub async fn recommend(
        &self,
        prefs: &PreferenceSet,
        count: usize,
    ) -> AppResult<Vec<MovieRecord>> {
        self.recommend_with_rng(prefs, count, &mut StdRng::from_entropy())
            .await
    }

    /// Same as [`Recommender::recommend`], with the sampling randomness
    /// supplied by the caller so tests can pin a seed
    pub async fn recommend_with_rng<R>(
        &self,
        prefs: &PreferenceSet,
        count: usize,
        rng: &mut R,
    ) -> AppResult<Vec<MovieRecord>>
    where
        R: Rng + Send,
    {
        let window = DateWindow::last_20_years();

        let genre_id = self.resolve_genre(&prefs.genre).await?;
        let (indian_n, global_n) = mix::split_counts(prefs.mix, count);

        let (indian_pool, global_pool) = self.pools.build(prefs, window, genre_id).await?;

        tracing::info!(
            indian_pool = indian_pool.len(),
            global_pool = global_pool.len(),
            indian_n,
            global_n,
            "Candidate pools built"
        );

        let mut picks = balanced_sample_by_year(indian_pool, indian_n, rng);
        picks.extend(balanced_sample_by_year(global_pool, global_n, rng));

        // A record can land in both pools when the source misclassifies it;
        // the merged list is deduplicated once, here
        let mut picks = dedupe_by_id(picks);
        picks.truncate(count);

        Ok(picks)
    }

    /// Case-insensitive genre lookup; unknown text means no filter
    async fn resolve_genre(&self, genre_text: &str) -> AppResult<Option<u64>> {
        let genre_text = genre_text.trim().to_lowercase();
        if genre_text.is_empty() {
            return Ok(None);
        }
        let catalog = self.provider.genre_catalog().await?;
        Ok(catalog.get(&genre_text).copied())
    }
}
