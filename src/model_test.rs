use crate::common::*;
use crate::model::*;

const ARTIST_ID: &str = "http://musicbrainz.org/artist/c0b2500e-0cef-4130-869d-732b23ed9df5";
const OTHER_ARTIST_ID: &str = "http://musicbrainz.org/artist/8cbf6e26-d1b8-4c7a-9a5d-3ab3b7c9b5f4";

fn event(country: Option<&str>, date: Option<&str>) -> ReleaseEvent {
    ReleaseEvent {
        country: country.map(String::from),
        date: date.map(String::from),
        ..Default::default()
    }
}

#[test]
fn test_tags_merge() {
    let mut artist = Artist::default();
    artist.add_tag(Tag::new("rock", 2));
    artist.add_tag(Tag::from("pop"));
    artist.add_tag(Tag::new("rock", 3));
    assert_eq!(artist.tags.len(), 2);
    assert_eq!(artist.tag("rock").unwrap().count, 5);
    assert_eq!(artist.tag("pop").unwrap().count, 1);
    assert!(artist.tag("jazz").is_none());

    artist.add_tag(Tag::new("pop", u32::MAX));
    assert_eq!(artist.tag("pop").unwrap().count, u32::MAX);
}

#[test]
fn test_relations() {
    let mut artist = Artist::new(Some(ARTIST_ID), Some("Tori Amos"));
    assert!(artist.relations_to(RelationTargetType::Artist).is_empty());
    assert!(artist.relation_target_types().is_empty());

    let married = Relation::new("http://musicbrainz.org/ns/rel-1.0#Married", RelationTargetType::Artist, OTHER_ARTIST_ID);
    let wiki = Relation::new(
        "http://musicbrainz.org/ns/rel-1.0#Wikipedia",
        RelationTargetType::Url,
        "http://en.wikipedia.org/wiki/Tori_Amos",
    );
    assert!(artist.add_relation(married.clone()));
    assert!(artist.add_relation(wiki));

    // Relations missing a mandatory part are never attached.
    assert!(!artist.add_relation(Relation::default()));
    assert!(!artist.add_relation(Relation {
        target_id: None,
        ..married.clone()
    }));
    assert!(!artist.add_relation(Relation {
        target_type: None,
        ..married.clone()
    }));

    assert_eq!(
        artist.relation_target_types(),
        vec![RelationTargetType::Artist, RelationTargetType::Url]
    );
    assert_eq!(artist.relations_to(RelationTargetType::Artist), &[married]);
    assert_eq!(artist.relations(None, None).len(), 2);
    assert_eq!(artist.relations(Some(RelationTargetType::Url), None).len(), 1);
    assert_eq!(
        artist
            .relations(None, Some("http://musicbrainz.org/ns/rel-1.0#Married"))
            .len(),
        1
    );
    assert!(artist
        .relations(Some(RelationTargetType::Url), Some("http://musicbrainz.org/ns/rel-1.0#Married"))
        .is_empty());
}

#[test]
fn test_relation_attributes_are_a_set() {
    let mut relation = Relation::new("x", RelationTargetType::Url, "http://example.com/");
    relation.add_attribute("a");
    relation.add_attribute("b");
    relation.add_attribute("a");
    assert_eq!(relation.attributes, vec!["a", "b"]);
    assert_eq!(relation.direction, Direction::Both);
}

#[test]
fn test_relation_target_type_uris() {
    for tt in RelationTargetType::ALL {
        assert_eq!(RelationTargetType::from_uri(&tt.uri()), Some(tt));
    }
    assert_eq!(
        RelationTargetType::from_uri("http://musicbrainz.org/ns/rel-1.0#URL"),
        Some(RelationTargetType::Url)
    );
    assert_eq!(RelationTargetType::from_uri("http://musicbrainz.org/ns/rel-1.0#Spaceship"), None);
    assert_eq!(RelationTargetType::from_uri("Artist"), None);
    assert_eq!(RelationTargetType::Label.uri(), "http://musicbrainz.org/ns/rel-1.0#Label");
}

#[test]
fn test_direction_parse() {
    assert_eq!("forward".parse::<Direction>().unwrap(), Direction::Forward);
    assert_eq!(" backward ".parse::<Direction>().unwrap(), Direction::Backward);
    assert_eq!("none".parse::<Direction>().unwrap(), Direction::None);
    assert!("sideways".parse::<Direction>().is_err());
    assert_eq!(Direction::default(), Direction::Both);
    assert_eq!(Direction::Both.to_string(), "both");
}

#[test]
fn test_unique_name() {
    let mut artist = Artist::new(None, Some("Tori Amos"));
    assert_eq!(artist.unique_name().as_deref(), Some("Tori Amos"));
    artist.disambiguation = Some("   ".to_string());
    assert_eq!(artist.unique_name().as_deref(), Some("Tori Amos"));
    artist.disambiguation = Some("yes, that one".to_string());
    assert_eq!(artist.unique_name().as_deref(), Some("Tori Amos (yes, that one)"));

    let label = Label::new(None, None);
    assert_eq!(label.unique_name(), None);
}

#[test]
fn test_earliest_release_date() {
    let mut release = Release::default();
    assert_eq!(release.earliest_release_date(), None);

    release.release_events = vec![
        event(Some("US"), Some("2000")),
        event(Some("GB"), Some("2000-10-12")),
        event(Some("DE"), Some("2000-10")),
        event(Some("JP"), None),
    ];
    assert_eq!(release.earliest_release_date(), Some("2000-10-12"));
    assert_eq!(release.earliest_release_event().unwrap().country.as_deref(), Some("GB"));

    release.release_events.push(event(None, Some("1999")));
    assert_eq!(release.earliest_release_date(), Some("1999"));

    let map = release.release_events_map();
    assert_eq!(map.len(), 3);
    assert_eq!(map["DE"], "2000-10");
}

#[test]
fn test_release_types_are_ordered_set() {
    let mut release = Release::default();
    release.add_type(RELEASE_TYPE_OFFICIAL);
    release.add_type(RELEASE_TYPE_ALBUM);
    release.add_type(RELEASE_TYPE_OFFICIAL);
    assert_eq!(release.types, vec![RELEASE_TYPE_OFFICIAL, RELEASE_TYPE_ALBUM]);
}

#[test]
fn test_single_artist_release() {
    let mut release = Release::default();
    assert_eq!(release.is_single_artist_release(), None);

    release.artist = Some(Box::new(Artist::new(Some(ARTIST_ID), None)));
    assert_eq!(release.is_single_artist_release(), Some(true));

    let mut track = Track::new(None, Some("Crucify"));
    track.artist = Some(Box::new(Artist::new(Some(ARTIST_ID), None)));
    release.tracks.push(track);
    release.tracks.push(Track::new(None, Some("No artist")));
    assert_eq!(release.is_single_artist_release(), Some(true));

    let mut guest = Track::new(None, Some("Guest"));
    guest.artist = Some(Box::new(Artist::new(Some(OTHER_ARTIST_ID), None)));
    release.tracks.push(guest);
    assert_eq!(release.is_single_artist_release(), Some(false));
}

#[test]
fn test_text_representation_names() {
    let mut release = Release::default();
    release.text_language = Some("ENG".to_string());
    release.text_script = Some("Latn".to_string());
    assert_eq!(release.text_language_name(), Some("English"));
    assert_eq!(release.text_script_name(), Some("Latin"));

    release.text_language = Some("XXX".to_string());
    assert_eq!(release.text_language_name(), None);
}

#[test]
fn test_duration_split() {
    let mut track = Track::default();
    assert_eq!(track.duration_split(), (0, 0));
    track.duration = Some(218666);
    assert_eq!(track.duration_split(), (3, 39));
    track.duration = Some(59_500);
    assert_eq!(track.duration_split(), (1, 0));
    track.duration = Some(499);
    assert_eq!(track.duration_split(), (0, 0));
    track.duration = Some(u64::MAX);
    assert_eq!(track.duration_split(), (307445734561825, 52));
}

#[test]
fn test_artist_release_groups_view() {
    let rg = |id: Option<&str>, title: &str| ReleaseGroup::new(id, Some(title));
    let with_group = |group: ReleaseGroup| Release {
        release_group: Some(Box::new(group)),
        ..Default::default()
    };

    let mut artist = Artist::default();
    artist.release_groups.push(rg(Some("http://musicbrainz.org/release-group/1"), "One"));
    artist.releases.push(with_group(rg(Some("http://musicbrainz.org/release-group/1"), "One again")));
    artist.releases.push(with_group(rg(Some("http://musicbrainz.org/release-group/2"), "Two")));
    artist.releases.push(Release::default());
    artist.releases.push(with_group(rg(None, "Anonymous")));

    let titles: Vec<&str> = artist
        .release_groups()
        .into_iter()
        .filter_map(|g| g.title.as_deref())
        .collect();
    assert_eq!(titles, vec!["One", "Two", "Anonymous"]);
}

#[test]
fn test_disc_submission_url() {
    let mut disc = Disc::new("J68I_CDcUFdCRCIbHSEbTBCbooA-");
    assert!(!disc.is_complete());
    assert_eq!(disc.submission_url(DEFAULT_HOST), None);

    disc.sectors = Some(20000);
    disc.first_track_num = Some(1);
    disc.last_track_num = Some(2);
    disc.tracks = vec![(150, 10000), (10150, 9850)];
    assert!(disc.is_complete());
    assert_eq!(
        disc.submission_url(DEFAULT_HOST).as_deref(),
        Some("http://musicbrainz.org/bare/cdlookup.html?id=J68I_CDcUFdCRCIbHSEbTBCbooA-&toc=1+2+20000+150+10150&tracks=2")
    );

    disc.last_track_num = Some(3);
    assert!(!disc.is_complete());

    disc.first_track_num = Some(0);
    disc.last_track_num = Some(u32::MAX);
    assert!(!disc.is_complete());
    assert_eq!(disc.submission_url(DEFAULT_HOST), None);
}

#[test]
fn test_result_list() {
    let mut results: ResultList<Label> = ResultList::default();
    assert!(results.is_empty());
    results.push(Label::new(None, Some("Atlantic Records")), Some(100));
    results.push(Label::new(None, Some("Atlantic Jaxx")), None);
    assert_eq!(results.len(), 2);
    let names: Vec<&str> = results.entities().filter_map(|l| l.name.as_deref()).collect();
    assert_eq!(names, vec!["Atlantic Records", "Atlantic Jaxx"]);
    assert_eq!(results.items[1].score, None);
}

#[test]
fn test_entity_ids() {
    let mut track = Track::new(Some("http://musicbrainz.org/track/1"), None);
    assert_eq!(track.id(), Some("http://musicbrainz.org/track/1"));
    track.set_id(None);
    assert_eq!(track.id(), None);

    let target = RelationTarget::Label(Box::new(Label::new(Some("http://musicbrainz.org/label/2"), None)));
    assert_eq!(target.id(), Some("http://musicbrainz.org/label/2"));
}
