use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MovieRecord, Origin, PreferenceSet},
    routes::AppState,
    services::{chat::normalize_answer, mix},
};

/// Recommendations returned per request unless the caller asks otherwise
pub const DEFAULT_COUNT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub fav_movie: String,
    #[serde(default)]
    pub fav_actor: String,
    #[serde(default)]
    pub fav_song: String,
    #[serde(default)]
    pub genre: String,
    /// Free text like "more indian" or "hollywood"; classified server-side
    #[serde(default)]
    pub mix: String,
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationItem {
    pub id: Option<u64>,
    pub title: String,
    pub release_year: Option<i32>,
    pub original_language: String,
    pub origin: Origin,
    pub vote_average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl From<MovieRecord> for RecommendationItem {
    fn from(movie: MovieRecord) -> Self {
        let release_year = movie.release_year();
        let origin = movie.origin();
        Self {
            id: movie.id,
            title: movie.title,
            release_year,
            original_language: movie.original_language,
            origin,
            vote_average: movie.vote_average,
            overview: movie.overview,
        }
    }
}

impl RecommendationRequest {
    /// Normalizes trivial non-answers and classifies the mix text before
    /// anything reaches the recommendation core
    fn into_preferences(self) -> PreferenceSet {
        PreferenceSet {
            fav_movie: normalize_answer(&self.fav_movie),
            fav_actor: normalize_answer(&self.fav_actor),
            fav_song: normalize_answer(&self.fav_song),
            genre: normalize_answer(&self.genre),
            mix: mix::classify_mix(&normalize_answer(&self.mix)),
        }
    }
}

/// Handler for the form-based recommendation endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<RecommendationItem>>> {
    let count = request.count.unwrap_or(DEFAULT_COUNT);
    if count == 0 {
        return Err(AppError::InvalidInput(
            "count must be at least 1".to_string(),
        ));
    }

    let prefs = request.into_preferences();

    tracing::info!(
        request_id = %request_id,
        count,
        mix = ?prefs.mix,
        has_actor = !prefs.fav_actor.is_empty(),
        "Processing recommendation request"
    );

    let movies = state.recommender.recommend(&prefs, count).await?;

    tracing::info!(
        request_id = %request_id,
        results = movies.len(),
        "Recommendation request completed"
    );

    Ok(Json(
        movies.into_iter().map(RecommendationItem::from).collect(),
    ))
}
