use serde::{Deserialize, Serialize};

/// Original-language codes classified as Indian cinema
/// (Hindi, Tamil, Telugu, Malayalam, Kannada)
pub const INDIAN_LANGUAGES: [&str; 5] = ["hi", "ta", "te", "ml", "kn"];

/// Which side of the Indian/global split a movie falls on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Indian,
    Global,
}

impl Origin {
    /// Classifies a two-letter original-language code
    pub fn of(language: &str) -> Self {
        if INDIAN_LANGUAGES.contains(&language.to_lowercase().as_str()) {
            Origin::Indian
        } else {
            Origin::Global
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Indian => write!(f, "Indian"),
            Origin::Global => write!(f, "Global"),
        }
    }
}

/// A movie as returned by the metadata API
///
/// Deserialized leniently at the gateway boundary: TMDB occasionally returns
/// partial entries, so every field defaults. Records without an id never
/// survive deduplication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_language: String,
    /// ISO date string; may be empty or malformed
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: Option<String>,
}

impl MovieRecord {
    /// Release year parsed from the first four characters of the date
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.get(..4)?.parse().ok()
    }

    /// Origin label derived from the original language
    pub fn origin(&self) -> Origin {
        Origin::of(&self.original_language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(language: &str, date: &str) -> MovieRecord {
        MovieRecord {
            id: Some(1),
            title: "RRR".to_string(),
            original_language: language.to_string(),
            release_date: date.to_string(),
            vote_average: 7.8,
            overview: None,
        }
    }

    #[test]
    fn test_release_year_parses_iso_date() {
        assert_eq!(record("te", "2022-03-24").release_year(), Some(2022));
    }

    #[test]
    fn test_release_year_empty_date() {
        assert_eq!(record("te", "").release_year(), None);
    }

    #[test]
    fn test_release_year_malformed_date() {
        assert_eq!(record("te", "22-3").release_year(), None);
        assert_eq!(record("te", "soon").release_year(), None);
    }

    #[test]
    fn test_origin_classification() {
        assert_eq!(Origin::of("hi"), Origin::Indian);
        assert_eq!(Origin::of("ta"), Origin::Indian);
        assert_eq!(Origin::of("TE"), Origin::Indian);
        assert_eq!(Origin::of("en"), Origin::Global);
        assert_eq!(Origin::of("ko"), Origin::Global);
        assert_eq!(Origin::of(""), Origin::Global);
    }

    #[test]
    fn test_origin_is_stable_per_code() {
        // Pure function of the language code
        for code in ["hi", "en", "ml", "fr"] {
            assert_eq!(Origin::of(code), Origin::of(code));
        }
    }

    #[test]
    fn test_movie_record_lenient_deserialization() {
        let json = r#"{
            "id": 447365,
            "title": "Jawan",
            "original_language": "hi",
            "release_date": "2023-09-07",
            "vote_average": 7.1,
            "overview": "An emotional journey.",
            "popularity": 99.5
        }"#;

        let movie: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, Some(447365));
        assert_eq!(movie.title, "Jawan");
        assert_eq!(movie.release_year(), Some(2023));
        assert_eq!(movie.origin(), Origin::Indian);
    }

    #[test]
    fn test_movie_record_missing_fields_default() {
        let movie: MovieRecord = serde_json::from_str(r#"{"title": "Untitled"}"#).unwrap();
        assert_eq!(movie.id, None);
        assert_eq!(movie.release_date, "");
        assert_eq!(movie.release_year(), None);
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.origin(), Origin::Global);
    }
}
