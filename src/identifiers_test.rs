use crate::common::{NS_MMD_1, NS_REL_1};
use crate::identifiers::*;

const ARTIST_PREFIX: &str = "http://musicbrainz.org/artist/";
const UUID: &str = "c0b2500e-0cef-4130-869d-732b23ed9df5";

fn mbid() -> String {
    format!("{ARTIST_PREFIX}{UUID}")
}

#[test]
fn test_extract_uuid() {
    assert_eq!(extract_uuid("", None).unwrap(), "");
    assert_eq!(extract_uuid(UUID, None).unwrap(), UUID);
    assert_eq!(extract_uuid(&mbid(), None).unwrap(), UUID);
    assert_eq!(extract_uuid(&mbid(), Some(EntityType::Artist)).unwrap(), UUID);
}

#[test]
fn test_extract_uuid_bare_id_is_not_checked() {
    // Not correct, but there is nothing to check a bare id against.
    assert_eq!(extract_uuid(UUID, Some(EntityType::Release)).unwrap(), UUID);
}

#[test]
fn test_extract_uuid_kind_mismatch() {
    assert!(extract_uuid(&mbid(), Some(EntityType::Release)).is_err());
    assert!(extract_uuid(&mbid(), Some(EntityType::Track)).is_err());
}

#[test]
fn test_extract_uuid_invalid() {
    let err = extract_uuid(&format!("{}/xy", mbid()), Some(EntityType::Artist)).unwrap_err();
    assert!(err.id.ends_with("/xy"));

    let invalid_host = format!("http://example.invalid/{UUID}");
    assert!(extract_uuid(&invalid_host, None).is_err());

    let invalid_host_with_kind = format!("http://example.invalid/artist/{UUID}");
    assert!(extract_uuid(&invalid_host_with_kind, None).is_err());

    assert!(extract_uuid(&format!("ftp://musicbrainz.org/artist/{UUID}"), None).is_err());
    assert!(extract_uuid(&format!("http://musicbrainz.org/place/{UUID}"), None).is_err());
}

#[test]
fn test_extract_uuid_release_group() {
    let id = "http://musicbrainz.org/release-group/c6a62b78-70f7-44f7-b159-064f6b7ba03a";
    assert_eq!(
        extract_uuid(id, Some(EntityType::ReleaseGroup)).unwrap(),
        "c6a62b78-70f7-44f7-b159-064f6b7ba03a"
    );
    assert!(extract_uuid(id, Some(EntityType::Release)).is_err());
}

#[test]
fn test_extract_uuid_for_other_host() {
    let id = format!("http://test.musicbrainz.org/label/{UUID}");
    assert_eq!(extract_uuid_for_host("test.musicbrainz.org", &id, Some(EntityType::Label)).unwrap(), UUID);
    assert!(extract_uuid(&id, None).is_err());
}

#[test]
fn test_ids_need_http_and_a_rest() {
    assert!(extract_uuid(&format!("https://musicbrainz.org/artist/{UUID}"), None).is_err());
    assert!(extract_uuid("http://musicbrainz.org/artist/", Some(EntityType::Artist)).is_err());
    assert!(extract_entity_type("http://musicbrainz.org/artist/").is_err());
    assert_eq!(extract_uuid("", Some(EntityType::Artist)).unwrap(), "");

    // The host is compared after normalisation.
    assert_eq!(extract_uuid(&format!("http://MusicBrainz.org:80/artist/{UUID}"), None).unwrap(), UUID);
}

#[test]
fn test_extract_entity_type() {
    assert_eq!(extract_entity_type(&mbid()).unwrap(), Some(EntityType::Artist));
    assert_eq!(
        extract_entity_type(&format!("http://musicbrainz.org/release-group/{UUID}")).unwrap(),
        Some(EntityType::ReleaseGroup)
    );
    assert_eq!(
        extract_entity_type(&format!("http://musicbrainz.org/label/{UUID}")).unwrap(),
        Some(EntityType::Label)
    );
    assert_eq!(extract_entity_type("").unwrap(), None);

    assert!(extract_entity_type(UUID).is_err());
    assert!(extract_entity_type("http://musicbrainz.org/").is_err());
    assert!(extract_entity_type(&format!("http://example.invalid/artist/{UUID}")).is_err());
}

#[test]
fn test_extract_fragment() {
    let uri = format!("{NS_MMD_1}Album");

    assert_eq!(extract_fragment("", None).unwrap(), "");
    assert_eq!(extract_fragment("Album", None).unwrap(), "Album");
    assert_eq!(extract_fragment(&uri, None).unwrap(), "Album");
    assert_eq!(extract_fragment(&uri, Some(NS_MMD_1)).unwrap(), "Album");

    assert!(extract_fragment(&uri, Some("http://example.invalid/")).is_err());
    assert!(extract_fragment(&uri, Some(NS_REL_1)).is_err());
}

#[test]
fn test_extract_fragment_without_fragment() {
    assert_eq!(extract_fragment("http://example.com/page", None).unwrap(), "");
}

#[test]
fn test_make_absolute() {
    assert_eq!(make_absolute(ARTIST_PREFIX, UUID), mbid());
    assert_eq!(make_absolute(ARTIST_PREFIX, &mbid()), mbid());
    assert_eq!(make_absolute(NS_MMD_1, "Person"), format!("{NS_MMD_1}Person"));
    assert_eq!(make_absolute(NS_MMD_1, "//example.com/x"), "//example.com/x");
    assert_eq!(
        make_absolute("http://musicbrainz.org/url/", "http://en.wikipedia.org/wiki/Tori_Amos"),
        "http://en.wikipedia.org/wiki/Tori_Amos"
    );
    assert_eq!(make_absolute(NS_MMD_1, ""), "");
}

#[test]
fn test_absolute_id_reconstruction() {
    for kind in [
        EntityType::Artist,
        EntityType::Release,
        EntityType::Track,
        EntityType::Label,
        EntityType::ReleaseGroup,
    ] {
        let id = format!("{}{UUID}", entity_prefix("musicbrainz.org", kind.as_str()));
        let bare = extract_uuid(&id, Some(kind)).unwrap();
        assert_eq!(make_absolute(&entity_prefix("musicbrainz.org", kind.as_str()), &bare), id);
    }
}

#[test]
fn test_entity_type_from_str() {
    assert_eq!("release-group".parse::<EntityType>().unwrap(), EntityType::ReleaseGroup);
    assert_eq!(EntityType::ReleaseGroup.to_string(), "release-group");
    assert!("place".parse::<EntityType>().is_err());
}
