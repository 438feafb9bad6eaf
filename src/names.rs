use crate::common::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

// Name tables are embedded at compile time and decoded on first use.
const LANGUAGE_NAMES_JSON: &str = include_str!("language_names.json");
const SCRIPT_NAMES_JSON: &str = include_str!("script_names.json");

/// ISO-639-2/T code (`ENG`) to English language name.
pub static LANGUAGE_NAMES: Lazy<HashMap<String, String>> =
    Lazy::new(|| serde_json::from_str(LANGUAGE_NAMES_JSON).expect("Failed to parse language_names.json"));

/// ISO-15924 code (`Latn`) to script name.
pub static SCRIPT_NAMES: Lazy<HashMap<String, String>> =
    Lazy::new(|| serde_json::from_str(SCRIPT_NAMES_JSON).expect("Failed to parse script_names.json"));

static RELEASE_TYPE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (RELEASE_TYPE_NONE, "None"),
        (RELEASE_TYPE_ALBUM, "Album"),
        (RELEASE_TYPE_SINGLE, "Single"),
        (RELEASE_TYPE_EP, "EP"),
        (RELEASE_TYPE_COMPILATION, "Compilation"),
        (RELEASE_TYPE_SOUNDTRACK, "Soundtrack"),
        (RELEASE_TYPE_SPOKENWORD, "Spokenword"),
        (RELEASE_TYPE_INTERVIEW, "Interview"),
        (RELEASE_TYPE_AUDIOBOOK, "Audiobook"),
        (RELEASE_TYPE_LIVE, "Live"),
        (RELEASE_TYPE_REMIX, "Remix"),
        (RELEASE_TYPE_OTHER, "Other"),
        (RELEASE_TYPE_OFFICIAL, "Official"),
        (RELEASE_TYPE_PROMOTION, "Promotion"),
        (RELEASE_TYPE_BOOTLEG, "Bootleg"),
        (RELEASE_TYPE_PSEUDO_RELEASE, "Pseudo-Release"),
    ])
});

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGE_NAMES.get(code).map(String::as_str)
}

pub fn script_name(code: &str) -> Option<&'static str> {
    SCRIPT_NAMES.get(code).map(String::as_str)
}

/// Display name of a release type URI, e.g. `Pseudo-Release`.
pub fn release_type_name(type_uri: &str) -> Option<&'static str> {
    RELEASE_TYPE_NAMES.get(type_uri).copied()
}
