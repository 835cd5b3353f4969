use serde::{Deserialize, Serialize};

/// Requested balance between the Indian and global pools
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MixPreference {
    #[default]
    Balanced,
    MoreIndian,
    MoreGlobal,
}

/// User-stated preferences driving one recommendation request
///
/// Every text field is optional; empty means "no preference". The chat and
/// form layers normalize trivial non-answers before building one of these.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PreferenceSet {
    #[serde(default)]
    pub fav_movie: String,
    #[serde(default)]
    pub fav_actor: String,
    #[serde(default)]
    pub fav_song: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub mix: MixPreference,
}
