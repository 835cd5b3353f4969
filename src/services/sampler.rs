//! Year-balanced sampling of a candidate pool.
//!
//! Popularity-sorted discovery clusters heavily in the newest one or two
//! release years. Round-robin across year buckets keeps older titles in the
//! final list while upstream filtering still decides what enters each bucket.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::MovieRecord;
use crate::services::dedup::dedupe_by_id;

/// Selects up to `n` unique records spread across release years.
///
/// The deduplicated pool is bucketed by parsed release year, each bucket is
/// shuffled, and picks are drawn round-robin starting from the most recent
/// year. Records without a parseable date are excluded from bucketing; when
/// no record has one, the whole deduplicated pool is shuffled and truncated
/// instead. Repeated calls with the same pool may return different samples,
/// which is why the random source is a caller-supplied parameter.
pub fn balanced_sample_by_year<R: Rng>(
    pool: Vec<MovieRecord>,
    n: usize,
    rng: &mut R,
) -> Vec<MovieRecord> {
    let mut movies = dedupe_by_id(pool);

    if !movies.iter().any(|movie| movie.release_year().is_some()) {
        movies.shuffle(rng);
        movies.truncate(n);
        return movies;
    }

    let mut buckets: BTreeMap<i32, Vec<MovieRecord>> = BTreeMap::new();
    for movie in movies {
        if let Some(year) = movie.release_year() {
            buckets.entry(year).or_default().push(movie);
        }
    }

    for bucket in buckets.values_mut() {
        bucket.shuffle(rng);
    }

    let mut picked = Vec::with_capacity(n);
    let mut index = 0;
    while picked.len() < n {
        let mut progressed = false;
        // Most recent year first on every pass
        for bucket in buckets.values().rev() {
            if let Some(movie) = bucket.get(index) {
                picked.push(movie.clone());
                progressed = true;
                if picked.len() >= n {
                    break;
                }
            }
        }
        if !progressed {
            break;
        }
        index += 1;
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn record(id: u64, date: &str) -> MovieRecord {
        MovieRecord {
            id: Some(id),
            title: format!("movie-{}", id),
            original_language: "en".to_string(),
            release_date: date.to_string(),
            vote_average: 6.5,
            overview: None,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_sample_never_exceeds_n() {
        let pool = vec![
            record(1, "2020-01-01"),
            record(2, "2021-01-01"),
            record(3, "2022-01-01"),
            record(4, "2022-06-01"),
        ];
        let sample = balanced_sample_by_year(pool, 2, &mut rng());
        assert_eq!(sample.len(), 2);
    }

    #[test]
    fn test_sample_bounded_by_unique_dateable_records() {
        let pool = vec![
            record(1, "2020-01-01"),
            record(1, "2020-01-01"),
            record(2, ""),
            record(3, "2021-01-01"),
        ];
        // Two unique dateable records, so asking for 10 yields 2
        let sample = balanced_sample_by_year(pool, 10, &mut rng());
        assert_eq!(sample.len(), 2);
    }

    #[test]
    fn test_round_robin_covers_every_year_first() {
        // 3 years with 2 records each; the first 3 picks must span all years
        let pool = vec![
            record(1, "2020-03-01"),
            record(2, "2020-07-01"),
            record(3, "2021-03-01"),
            record(4, "2021-07-01"),
            record(5, "2022-03-01"),
            record(6, "2022-07-01"),
        ];

        let sample = balanced_sample_by_year(pool, 3, &mut rng());

        let years: Vec<i32> = sample
            .iter()
            .map(|movie| movie.release_year().unwrap())
            .collect();
        assert_eq!(years, vec![2022, 2021, 2020]);
    }

    #[test]
    fn test_second_pass_starts_after_full_coverage() {
        let pool = vec![
            record(1, "2020-03-01"),
            record(2, "2020-07-01"),
            record(3, "2021-03-01"),
            record(4, "2021-07-01"),
        ];

        let sample = balanced_sample_by_year(pool, 3, &mut rng());

        let years: Vec<i32> = sample
            .iter()
            .map(|movie| movie.release_year().unwrap())
            .collect();
        // Both years drawn once before either is drawn twice
        assert_eq!(&years[..2], &[2021, 2020]);
        assert!(years[2] == 2021 || years[2] == 2020);
    }

    #[test]
    fn test_fallback_when_no_record_has_a_year() {
        let pool = vec![record(1, ""), record(2, "tbd"), record(3, "")];
        let sample = balanced_sample_by_year(pool, 2, &mut rng());
        assert_eq!(sample.len(), 2);

        let ids: HashSet<_> = sample.iter().map(|movie| movie.id).collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_dateless_records_excluded_outside_fallback() {
        let pool = vec![record(1, "2020-01-01"), record(2, ""), record(3, "")];
        let sample = balanced_sample_by_year(pool, 3, &mut rng());
        assert_eq!(sample.len(), 1);
        assert_eq!(sample[0].id, Some(1));
    }

    #[test]
    fn test_exhausted_buckets_return_short_sample() {
        let pool = vec![record(1, "2020-01-01"), record(2, "2021-01-01")];
        let sample = balanced_sample_by_year(pool, 5, &mut rng());
        assert_eq!(sample.len(), 2);
    }

    #[test]
    fn test_duplicates_collapsed_before_sampling() {
        let pool = vec![
            record(1, "2020-01-01"),
            record(1, "2020-01-01"),
            record(1, "2020-01-01"),
        ];
        let sample = balanced_sample_by_year(pool, 3, &mut rng());
        assert_eq!(sample.len(), 1);
    }

    #[test]
    fn test_zero_n_returns_empty() {
        let pool = vec![record(1, "2020-01-01")];
        assert!(balanced_sample_by_year(pool, 0, &mut rng()).is_empty());
    }
}
