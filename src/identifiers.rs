/// The identifiers module converts between the textual forms an identifier takes: absolute entity
/// ids (`http://musicbrainz.org/artist/<uuid>`), their bare suffix, and namespace-qualified URIs
/// (`http://musicbrainz.org/ns/mmd-1.0#Album`) versus their fragment.
///
/// Everything here is a pure function. Anything that isn't a URI at all is treated as already
/// being in its short form and returned unchanged.
use crate::common::DEFAULT_HOST;
use crate::error::InvalidIdentifierError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use url::Url;

static ID_PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/(artist|release-group|release|track|label)/([^/]+)$").unwrap());

type IdResult<T> = std::result::Result<T, InvalidIdentifierError>;

/// The kinds of entity that are addressable by an absolute id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    Artist,
    Release,
    Track,
    Label,
    ReleaseGroup,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Artist => "artist",
            EntityType::Release => "release",
            EntityType::Track => "track",
            EntityType::Label => "label",
            EntityType::ReleaseGroup => "release-group",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = InvalidIdentifierError;

    fn from_str(s: &str) -> IdResult<Self> {
        match s {
            "artist" => Ok(EntityType::Artist),
            "release" => Ok(EntityType::Release),
            "track" => Ok(EntityType::Track),
            "label" => Ok(EntityType::Label),
            "release-group" => Ok(EntityType::ReleaseGroup),
            _ => Err(InvalidIdentifierError::new(s, "unknown entity type")),
        }
    }
}

fn parse_uri(s: &str) -> Option<Url> {
    Url::parse(s).ok()
}

/// Returns `(kind, rest)` of an absolute id on `host`. Only `http` ids are ids, the same form
/// `entity_prefix` builds.
fn split_absolute_id(host: &str, id: &str, url: &Url) -> IdResult<(EntityType, String)> {
    if url.scheme() != "http" || url.host_str() != Some(host) {
        return Err(InvalidIdentifierError::new(id, format!("not an id on {host}")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(InvalidIdentifierError::new(id, "unexpected query or fragment"));
    }

    let captures = ID_PATH_REGEX
        .captures(url.path())
        .ok_or_else(|| InvalidIdentifierError::new(id, "path is not /<kind>/<id>"))?;
    let kind = captures[1].parse::<EntityType>()?;
    Ok((kind, captures[2].to_string()))
}

/// Extracts the bare id from an absolute entity id on the default host.
///
/// Bare ids are returned unchanged, even if `expected` is given: there is nothing to check an
/// opaque string against.
pub fn extract_uuid(id: &str, expected: Option<EntityType>) -> IdResult<String> {
    extract_uuid_for_host(DEFAULT_HOST, id, expected)
}

pub fn extract_uuid_for_host(host: &str, id: &str, expected: Option<EntityType>) -> IdResult<String> {
    let Some(url) = parse_uri(id) else {
        return Ok(id.to_string());
    };

    let (kind, rest) = split_absolute_id(host, id, &url)?;
    match expected {
        Some(want) if want != kind => Err(InvalidIdentifierError::new(id, format!("expected {want} id"))),
        _ => Ok(rest),
    }
}

/// Returns the kind of entity an absolute id on the default host points at, `None` for an empty
/// id.
pub fn extract_entity_type(id: &str) -> IdResult<Option<EntityType>> {
    extract_entity_type_for_host(DEFAULT_HOST, id)
}

pub fn extract_entity_type_for_host(host: &str, id: &str) -> IdResult<Option<EntityType>> {
    if id.is_empty() {
        return Ok(None);
    }
    let url = parse_uri(id).ok_or_else(|| InvalidIdentifierError::new(id, "not an absolute id"))?;
    split_absolute_id(host, id, &url).map(|(kind, _)| Some(kind))
}

/// Returns the fragment of `uri`, checking it starts with `prefix` if one is given.
///
/// A URI without a fragment yields the empty string.
pub fn extract_fragment(uri: &str, prefix: Option<&str>) -> IdResult<String> {
    if parse_uri(uri).is_none() {
        return Ok(uri.to_string());
    }

    if let Some(prefix) = prefix {
        if !uri.starts_with(prefix) {
            return Err(InvalidIdentifierError::new(uri, format!("prefix {prefix} doesn't match")));
        }
    }

    Ok(uri.split_once('#').map(|(_, frag)| frag.to_string()).unwrap_or_default())
}

/// Prepends `prefix` unless `value` already has a scheme or a network location.
pub fn make_absolute(prefix: &str, value: &str) -> String {
    if value.is_empty() || value.starts_with("//") || parse_uri(value).is_some() {
        value.to_string()
    } else {
        format!("{prefix}{value}")
    }
}

/// `http://<host>/<kind>/`, the prefix absolute ids of that kind share.
pub fn entity_prefix(host: &str, kind: &str) -> String {
    format!("http://{host}/{kind}/")
}
