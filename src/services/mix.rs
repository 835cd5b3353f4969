//! Resolves a user's stated mix preference into per-pool counts.

use crate::models::MixPreference;

/// Classifies free-form mix text.
///
/// Case-insensitive substring match: anything mentioning "ind" leans Indian,
/// "glob"/"holly"/"other" leans global, everything else (including empty)
/// stays balanced.
pub fn classify_mix(text: &str) -> MixPreference {
    let text = text.to_lowercase();
    if text.contains("ind") {
        MixPreference::MoreIndian
    } else if text.contains("glob") || text.contains("holly") || text.contains("other") {
        MixPreference::MoreGlobal
    } else {
        MixPreference::Balanced
    }
}

/// Splits a total count between the Indian and global pools.
///
/// The global share absorbs any rounding, so the two always sum to `total`.
pub fn split_counts(mix: MixPreference, total: usize) -> (usize, usize) {
    let indian = match mix {
        MixPreference::MoreIndian => (total as f64 * 0.7).round() as usize,
        MixPreference::MoreGlobal => (total as f64 * 0.3).round() as usize,
        MixPreference::Balanced => total / 2,
    };
    (indian, total - indian)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_more_indian() {
        assert_eq!(classify_mix("more indian stuff"), MixPreference::MoreIndian);
        assert_eq!(classify_mix("India!"), MixPreference::MoreIndian);
    }

    #[test]
    fn test_classify_more_global() {
        assert_eq!(classify_mix("hollywood only"), MixPreference::MoreGlobal);
        assert_eq!(classify_mix("GLOBAL please"), MixPreference::MoreGlobal);
        assert_eq!(classify_mix("something other"), MixPreference::MoreGlobal);
    }

    #[test]
    fn test_classify_defaults_to_balanced() {
        assert_eq!(classify_mix(""), MixPreference::Balanced);
        assert_eq!(classify_mix("50-50"), MixPreference::Balanced);
        assert_eq!(classify_mix("whatever you think"), MixPreference::Balanced);
    }

    #[test]
    fn test_split_ten() {
        assert_eq!(split_counts(MixPreference::MoreIndian, 10), (7, 3));
        assert_eq!(split_counts(MixPreference::MoreGlobal, 10), (3, 7));
        assert_eq!(split_counts(MixPreference::Balanced, 10), (5, 5));
    }

    #[test]
    fn test_split_odd_total() {
        assert_eq!(split_counts(MixPreference::Balanced, 7), (3, 4));
    }

    #[test]
    fn test_split_sums_to_total_for_all_mixes() {
        for total in 0..=25 {
            for mix in [
                MixPreference::Balanced,
                MixPreference::MoreIndian,
                MixPreference::MoreGlobal,
            ] {
                let (indian, global) = split_counts(mix, total);
                assert_eq!(indian + global, total, "mix {:?} total {}", mix, total);
            }
        }
    }
}
