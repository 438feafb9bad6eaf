/// Constants and small helpers shared by the model, the parser and the writer.
use once_cell::sync::Lazy;
use regex::Regex;

/// The host all absolute entity ids are scoped to, unless configured otherwise.
pub const DEFAULT_HOST: &str = "musicbrainz.org";

// Namespace URI prefixes
pub const NS_MMD_1: &str = "http://musicbrainz.org/ns/mmd-1.0#";
pub const NS_REL_1: &str = "http://musicbrainz.org/ns/rel-1.0#";
pub const NS_EXT_1: &str = "http://musicbrainz.org/ns/ext-1.0#";

/// The special "Various Artists" artist.
pub const VARIOUS_ARTISTS_ID: &str = "http://musicbrainz.org/artist/89ad4ac3-39f7-470e-963a-56509c546377";

pub const ARTIST_TYPE_PERSON: &str = "http://musicbrainz.org/ns/mmd-1.0#Person";
pub const ARTIST_TYPE_GROUP: &str = "http://musicbrainz.org/ns/mmd-1.0#Group";

pub const RELEASE_TYPE_NONE: &str = "http://musicbrainz.org/ns/mmd-1.0#None";
pub const RELEASE_TYPE_ALBUM: &str = "http://musicbrainz.org/ns/mmd-1.0#Album";
pub const RELEASE_TYPE_SINGLE: &str = "http://musicbrainz.org/ns/mmd-1.0#Single";
pub const RELEASE_TYPE_EP: &str = "http://musicbrainz.org/ns/mmd-1.0#EP";
pub const RELEASE_TYPE_COMPILATION: &str = "http://musicbrainz.org/ns/mmd-1.0#Compilation";
pub const RELEASE_TYPE_SOUNDTRACK: &str = "http://musicbrainz.org/ns/mmd-1.0#Soundtrack";
pub const RELEASE_TYPE_SPOKENWORD: &str = "http://musicbrainz.org/ns/mmd-1.0#Spokenword";
pub const RELEASE_TYPE_INTERVIEW: &str = "http://musicbrainz.org/ns/mmd-1.0#Interview";
pub const RELEASE_TYPE_AUDIOBOOK: &str = "http://musicbrainz.org/ns/mmd-1.0#Audiobook";
pub const RELEASE_TYPE_LIVE: &str = "http://musicbrainz.org/ns/mmd-1.0#Live";
pub const RELEASE_TYPE_REMIX: &str = "http://musicbrainz.org/ns/mmd-1.0#Remix";
pub const RELEASE_TYPE_OTHER: &str = "http://musicbrainz.org/ns/mmd-1.0#Other";

pub const RELEASE_TYPE_OFFICIAL: &str = "http://musicbrainz.org/ns/mmd-1.0#Official";
pub const RELEASE_TYPE_PROMOTION: &str = "http://musicbrainz.org/ns/mmd-1.0#Promotion";
pub const RELEASE_TYPE_BOOTLEG: &str = "http://musicbrainz.org/ns/mmd-1.0#Bootleg";
pub const RELEASE_TYPE_PSEUDO_RELEASE: &str = "http://musicbrainz.org/ns/mmd-1.0#Pseudo-Release";

pub const USER_TYPE_AUTO_EDITOR: &str = "http://musicbrainz.org/ns/ext-1.0#AutoEditor";
pub const USER_TYPE_RELATIONSHIP_EDITOR: &str = "http://musicbrainz.org/ns/ext-1.0#RelationshipEditor";
pub const USER_TYPE_BOT: &str = "http://musicbrainz.org/ns/ext-1.0#Bot";
pub const USER_TYPE_NOT_NAGGABLE: &str = "http://musicbrainz.org/ns/ext-1.0#NotNaggable";

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`. The calendar itself isn't checked.
pub static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}(-\d{2}(-\d{2})?)?$").unwrap());

pub static LANGUAGE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

pub static SCRIPT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]{3}$").unwrap());

pub static COUNTRY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());

pub fn is_valid_date(s: &str) -> bool {
    DATE_REGEX.is_match(s)
}
