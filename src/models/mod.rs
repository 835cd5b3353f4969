mod movie;
mod preferences;

pub use movie::{MovieRecord, Origin, INDIAN_LANGUAGES};
pub use preferences::{MixPreference, PreferenceSet};
