/// The model module holds the music metadata domain graph: artists, releases, tracks, labels,
/// release groups and the value objects hanging off them.
///
/// Nothing in here does any I/O. The parser builds these types from XML and the writer turns them
/// back into XML, but they are plain data and can be built by hand just as well. All ids and type
/// values are absolute URIs, e.g. `http://musicbrainz.org/artist/<uuid>` or
/// `http://musicbrainz.org/ns/mmd-1.0#Person`.
use crate::common::NS_REL_1;
use crate::identifiers::EntityType;
use crate::names;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// Where a relation points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationTargetType {
    Artist,
    Release,
    Track,
    Label,
    Url,
}

impl RelationTargetType {
    pub const ALL: [RelationTargetType; 5] = [
        RelationTargetType::Artist,
        RelationTargetType::Release,
        RelationTargetType::Track,
        RelationTargetType::Label,
        RelationTargetType::Url,
    ];

    /// The fragment used on the wire, e.g. `Artist`.
    pub fn fragment(&self) -> &'static str {
        match self {
            RelationTargetType::Artist => "Artist",
            RelationTargetType::Release => "Release",
            RelationTargetType::Track => "Track",
            RelationTargetType::Label => "Label",
            RelationTargetType::Url => "Url",
        }
    }

    pub fn uri(&self) -> String {
        format!("{NS_REL_1}{}", self.fragment())
    }

    /// Accepts the absolute URI (`http://musicbrainz.org/ns/rel-1.0#Artist`) in any case.
    pub fn from_uri(uri: &str) -> Option<Self> {
        let fragment = uri.strip_prefix(NS_REL_1)?.to_lowercase();
        RelationTargetType::ALL
            .into_iter()
            .find(|tt| tt.entity_kind() == fragment)
    }

    /// The path segment ids of this target type live under, e.g. `artist` or `url`.
    pub fn entity_kind(&self) -> &'static str {
        match self {
            RelationTargetType::Artist => "artist",
            RelationTargetType::Release => "release",
            RelationTargetType::Track => "track",
            RelationTargetType::Label => "label",
            RelationTargetType::Url => "url",
        }
    }

    /// The entity kind behind this target type, `None` for URLs.
    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            RelationTargetType::Artist => Some(EntityType::Artist),
            RelationTargetType::Release => Some(EntityType::Release),
            RelationTargetType::Track => Some(EntityType::Track),
            RelationTargetType::Label => Some(EntityType::Label),
            RelationTargetType::Url => None,
        }
    }
}

/// Reading direction of a relation.
///
/// `Both` is the default: the relation reads the same either way (a marriage, for example).
/// `None` is a distinct value some documents send, it is kept as-is and never produced by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Both,
    Forward,
    Backward,
    None,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Both => "both",
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::None => "none",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "both" => Ok(Direction::Both),
            "forward" => Ok(Direction::Forward),
            "backward" => Ok(Direction::Backward),
            "none" => Ok(Direction::None),
            other => Err(format!("unknown relation direction: {other}")),
        }
    }
}

/// The entity a relation points at, when the document inlined it.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationTarget {
    Artist(Box<Artist>),
    Release(Box<Release>),
    Track(Box<Track>),
    Label(Box<Label>),
}

impl RelationTarget {
    pub fn id(&self) -> Option<&str> {
        match self {
            RelationTarget::Artist(a) => a.id(),
            RelationTarget::Release(r) => r.id(),
            RelationTarget::Track(t) => t.id(),
            RelationTarget::Label(l) => l.id(),
        }
    }
}

/// A directed, typed link from an entity to another entity or a URL.
///
/// For URL relations `target_id` is the URL itself, for all other target types it is an absolute
/// entity id. A relation is only valid once `relation_type`, `target_type` and `target_id` are all
/// set; invalid relations are never attached to an entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Relation {
    pub relation_type: Option<String>,
    pub target_type: Option<RelationTargetType>,
    pub target_id: Option<String>,
    pub direction: Direction,
    pub attributes: Vec<String>,
    pub begin_date: Option<String>,
    pub end_date: Option<String>,
    pub target: Option<RelationTarget>,
}

impl Relation {
    pub fn new(relation_type: &str, target_type: RelationTargetType, target_id: &str) -> Self {
        Self {
            relation_type: Some(relation_type.to_string()),
            target_type: Some(target_type),
            target_id: Some(target_id.to_string()),
            ..Default::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.relation_type.is_some() && self.target_type.is_some() && self.target_id.is_some()
    }

    /// Attributes form a set; adding one twice is a no-op.
    pub fn add_attribute(&mut self, attribute: &str) {
        if !self.attributes.iter().any(|a| a == attribute) {
            self.attributes.push(attribute.to_string());
        }
    }
}

pub type RelationMap = BTreeMap<RelationTargetType, Vec<Relation>>;

/// A folksonomy tag. Tags on one entity are unique by value; `count` says how often it was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub value: String,
    pub count: u32,
}

impl Tag {
    pub fn new(value: &str, count: u32) -> Self {
        Self {
            value: value.to_string(),
            count,
        }
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::new(value, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rating {
    pub value: Option<f32>,
    pub count: Option<u32>,
}

/// Behaviour shared by all first-level entities: an optional absolute id, relations grouped by
/// target type, and tags.
pub trait Entity {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: Option<String>);
    fn relations_map(&self) -> &RelationMap;
    fn relations_map_mut(&mut self) -> &mut RelationMap;
    fn tags(&self) -> &[Tag];
    fn tags_mut(&mut self) -> &mut Vec<Tag>;

    /// Relations to `target_type`, empty if there are none.
    fn relations_to(&self, target_type: RelationTargetType) -> &[Relation] {
        self.relations_map()
            .get(&target_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All relations, optionally restricted to a target type and/or a relation type URI.
    fn relations(&self, target_type: Option<RelationTargetType>, relation_type: Option<&str>) -> Vec<&Relation> {
        let all: Vec<&Relation> = match target_type {
            Some(tt) => self.relations_to(tt).iter().collect(),
            None => self.relations_map().values().flatten().collect(),
        };
        match relation_type {
            Some(rt) => all
                .into_iter()
                .filter(|r| r.relation_type.as_deref() == Some(rt))
                .collect(),
            None => all,
        }
    }

    /// Attaches `relation` if it is valid. Returns whether it was attached.
    fn add_relation(&mut self, relation: Relation) -> bool {
        match relation.target_type {
            Some(tt) if relation.is_valid() => {
                self.relations_map_mut().entry(tt).or_default().push(relation);
                true
            }
            _ => false,
        }
    }

    fn relation_target_types(&self) -> Vec<RelationTargetType> {
        self.relations_map()
            .iter()
            .filter(|(_, rels)| !rels.is_empty())
            .map(|(tt, _)| *tt)
            .collect()
    }

    /// Adds a tag, summing counts with an existing tag of the same value.
    fn add_tag(&mut self, tag: Tag) {
        let tags = self.tags_mut();
        match tags.iter_mut().find(|t| t.value == tag.value) {
            Some(existing) => existing.count = existing.count.saturating_add(tag.count),
            None => tags.push(tag),
        }
    }

    fn tag(&self, value: &str) -> Option<&Tag> {
        self.tags().iter().find(|t| t.value == value)
    }
}

macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {$(
        impl Entity for $ty {
            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }
            fn set_id(&mut self, id: Option<String>) {
                self.id = id;
            }
            fn relations_map(&self) -> &RelationMap {
                &self.relations
            }
            fn relations_map_mut(&mut self) -> &mut RelationMap {
                &mut self.relations
            }
            fn tags(&self) -> &[Tag] {
                &self.tags
            }
            fn tags_mut(&mut self) -> &mut Vec<Tag> {
                &mut self.tags
            }
        }
    )+};
}

impl_entity!(Artist, Release, Track, Label, ReleaseGroup);

/// An alternative name of an artist or a label, like a common misspelling or a transliteration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtistAlias {
    pub value: Option<String>,
    pub alias_type: Option<String>,
    pub script: Option<String>,
}

pub type LabelAlias = ArtistAlias;

fn unique_name(name: Option<&str>, disambiguation: Option<&str>) -> Option<String> {
    match disambiguation.map(str::trim) {
        Some(d) if !d.is_empty() => Some(format!("{} ({})", name.unwrap_or_default(), d)),
        _ => name.map(String::from),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Artist {
    pub id: Option<String>,
    /// `ARTIST_TYPE_PERSON` or `ARTIST_TYPE_GROUP`.
    pub artist_type: Option<String>,
    pub name: Option<String>,
    pub sort_name: Option<String>,
    pub disambiguation: Option<String>,
    pub begin_date: Option<String>,
    pub end_date: Option<String>,
    pub aliases: Vec<ArtistAlias>,
    pub releases: Vec<Release>,
    /// Release groups listed explicitly. See [`Artist::release_groups`] for the full view.
    pub release_groups: Vec<ReleaseGroup>,
    pub tags: Vec<Tag>,
    pub rating: Option<Rating>,
    pub relations: RelationMap,
}

impl Artist {
    pub fn new(id: Option<&str>, name: Option<&str>) -> Self {
        Self {
            id: id.map(String::from),
            name: name.map(String::from),
            ..Default::default()
        }
    }

    /// The name with the disambiguation in parentheses, if there is one.
    pub fn unique_name(&self) -> Option<String> {
        unique_name(self.name.as_deref(), self.disambiguation.as_deref())
    }

    /// The explicit release groups followed by those owned by the artist's releases, each id
    /// reported once.
    pub fn release_groups(&self) -> Vec<&ReleaseGroup> {
        let mut rv: Vec<&ReleaseGroup> = Vec::new();
        let candidates = self
            .release_groups
            .iter()
            .chain(self.releases.iter().filter_map(|r| r.release_group.as_deref()));
        for rg in candidates {
            let seen = rg.id.is_some() && rv.iter().any(|other| other.id == rg.id);
            if !seen {
                rv.push(rg);
            }
        }
        rv
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Release {
    pub id: Option<String>,
    pub types: Vec<String>,
    pub title: Option<String>,
    /// ISO-639-2/T code, e.g. `ENG`.
    pub text_language: Option<String>,
    /// ISO-15924 code, e.g. `Latn`.
    pub text_script: Option<String>,
    pub asin: Option<String>,
    pub artist: Option<Box<Artist>>,
    pub release_events: Vec<ReleaseEvent>,
    pub discs: Vec<Disc>,
    pub tracks: Vec<Track>,
    /// Position of `tracks[0]` on the release when only part of the track list was sent.
    pub tracks_offset: Option<u32>,
    pub tracks_count: Option<u32>,
    pub release_group: Option<Box<ReleaseGroup>>,
    pub tags: Vec<Tag>,
    pub rating: Option<Rating>,
    pub relations: RelationMap,
}

impl Release {
    pub fn new(id: Option<&str>, title: Option<&str>) -> Self {
        Self {
            id: id.map(String::from),
            title: title.map(String::from),
            ..Default::default()
        }
    }

    /// Types form an ordered set.
    pub fn add_type(&mut self, type_uri: &str) {
        if !self.types.iter().any(|t| t == type_uri) {
            self.types.push(type_uri.to_string());
        }
    }

    /// Whether every track with an artist shares the release artist's id. `None` if the release
    /// has no artist.
    pub fn is_single_artist_release(&self) -> Option<bool> {
        let release_artist = self.artist.as_ref()?;
        Some(
            self.tracks
                .iter()
                .filter_map(|t| t.artist.as_ref())
                .all(|a| a.id == release_artist.id),
        )
    }

    /// Country code to date. Events lacking either are left out.
    pub fn release_events_map(&self) -> BTreeMap<String, String> {
        self.release_events
            .iter()
            .filter_map(|e| Some((e.country.clone()?, e.date.clone()?)))
            .collect()
    }

    /// The event with the earliest date. An incomplete date sorts after the complete dates it
    /// covers, so `2000-10-12` wins over `2000`.
    pub fn earliest_release_event(&self) -> Option<&ReleaseEvent> {
        self.release_events
            .iter()
            .filter_map(|e| e.date.as_deref().map(|d| (sortable_date(d), e)))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, e)| e)
    }

    pub fn earliest_release_date(&self) -> Option<&str> {
        self.earliest_release_event().and_then(|e| e.date.as_deref())
    }

    pub fn text_language_name(&self) -> Option<&'static str> {
        names::language_name(self.text_language.as_deref()?)
    }

    pub fn text_script_name(&self) -> Option<&'static str> {
        names::script_name(self.text_script.as_deref()?)
    }
}

fn sortable_date(date: &str) -> String {
    match date.len() {
        10 => date.to_string(),
        7 => format!("{date}-99"),
        _ => format!("{date}-99-99"),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    pub id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<Box<Artist>>,
    /// Milliseconds.
    pub duration: Option<u64>,
    pub puids: Vec<String>,
    pub trm_ids: Vec<String>,
    pub releases: Vec<Release>,
    pub tags: Vec<Tag>,
    pub rating: Option<Rating>,
    pub relations: RelationMap,
}

impl Track {
    pub fn new(id: Option<&str>, title: Option<&str>) -> Self {
        Self {
            id: id.map(String::from),
            title: title.map(String::from),
            ..Default::default()
        }
    }

    /// `(minutes, seconds)`, seconds rounded half up. `(0, 0)` if the duration is unknown.
    pub fn duration_split(&self) -> (u64, u64) {
        match self.duration {
            None => (0, 0),
            Some(ms) => {
                let seconds = ms / 1000 + u64::from(ms % 1000 >= 500);
                (seconds / 60, seconds % 60)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Label {
    pub id: Option<String>,
    pub label_type: Option<String>,
    pub name: Option<String>,
    pub sort_name: Option<String>,
    pub disambiguation: Option<String>,
    pub begin_date: Option<String>,
    pub end_date: Option<String>,
    pub country: Option<String>,
    /// The label code without the `LC` prefix, kept as text.
    pub code: Option<String>,
    pub aliases: Vec<LabelAlias>,
    pub tags: Vec<Tag>,
    pub rating: Option<Rating>,
    pub relations: RelationMap,
}

impl Label {
    pub fn new(id: Option<&str>, name: Option<&str>) -> Self {
        Self {
            id: id.map(String::from),
            name: name.map(String::from),
            ..Default::default()
        }
    }

    pub fn unique_name(&self) -> Option<String> {
        unique_name(self.name.as_deref(), self.disambiguation.as_deref())
    }
}

/// Groups the releases that are versions of the same album, single, etc.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseGroup {
    pub id: Option<String>,
    pub title: Option<String>,
    pub group_type: Option<String>,
    pub artist: Option<Box<Artist>>,
    pub releases: Vec<Release>,
    pub tags: Vec<Tag>,
    pub rating: Option<Rating>,
    pub relations: RelationMap,
}

impl ReleaseGroup {
    pub fn new(id: Option<&str>, title: Option<&str>) -> Self {
        Self {
            id: id.map(String::from),
            title: title.map(String::from),
            ..Default::default()
        }
    }
}

/// Where and when a release was released. Dates use `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseEvent {
    pub country: Option<String>,
    pub date: Option<String>,
    pub catalog_number: Option<String>,
    pub barcode: Option<String>,
    pub format: Option<String>,
    pub label: Option<Label>,
}

/// A physical audio CD, identified by the DiscID computed from its table of contents.
///
/// DiscIDs are 28 characters long, like `J68I_CDcUFdCRCIbHSEbTBCbooA-`. Documents only carry the
/// id and the sector count; the track numbers and `(offset, length)` pairs come from a disc reader.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Disc {
    pub id: Option<String>,
    pub sectors: Option<u64>,
    pub first_track_num: Option<u32>,
    pub last_track_num: Option<u32>,
    /// `(offset, length)` in sectors per track, leadout excluded.
    pub tracks: Vec<(u64, u64)>,
}

impl Disc {
    pub fn new(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        match (self.first_track_num, self.last_track_num) {
            (Some(first), Some(last)) if last >= first => {
                (last - first).checked_add(1).map(|n| n as usize) == Some(self.tracks.len())
            }
            _ => false,
        }
    }

    /// The URL of the interactive disc submission page. Needs id, sector count and first/last
    /// track numbers, which only a disc reader provides.
    pub fn submission_url(&self, host: &str) -> Option<String> {
        let id = self.id.as_deref()?;
        let first = self.first_track_num?;
        let last = self.last_track_num?;
        let sectors = self.sectors?;
        let track_count = last.checked_sub(first)?.checked_add(1)?;

        let mut toc = format!("{first} {last} {sectors}");
        for (offset, _) in &self.tracks {
            toc.push_str(&format!(" {offset}"));
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("id", id)
            .append_pair("toc", &toc)
            .append_pair("tracks", &track_count.to_string())
            .finish();
        Some(format!("http://{host}/bare/cdlookup.html?{query}"))
    }
}

/// A user of the web service. Only sent through the vendor extension namespace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct User {
    pub name: Option<String>,
    pub types: Vec<String>,
    pub show_nag: Option<bool>,
}

/// A disc that isn't in the database proper yet, with free text instead of entity references.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CDStub {
    pub id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub barcode: Option<String>,
    pub comment: Option<String>,
    pub tracks: Vec<CDStubTrack>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CDStubTrack {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration: Option<u64>,
}

/// A search hit with its relevance, 0 to 100.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult<T> {
    pub entity: T,
    pub score: Option<u8>,
}

impl<T> ScoredResult<T> {
    pub fn new(entity: T, score: Option<u8>) -> Self {
        Self { entity, score }
    }
}

/// A window of `count` results starting at `offset` in a larger server side result set.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultList<T> {
    pub items: Vec<ScoredResult<T>>,
    pub offset: Option<u32>,
    pub count: Option<u32>,
}

impl<T> Default for ResultList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            offset: None,
            count: None,
        }
    }
}

impl<T> ResultList<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, entity: T, score: Option<u8>) {
        self.items.push(ScoredResult::new(entity, score));
    }

    pub fn entities(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|r| &r.entity)
    }
}

/// A parsed MMD document.
///
/// Lookups by id fill exactly one of the singular fields; searches fill the result lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    pub artist: Option<Artist>,
    pub release: Option<Release>,
    pub track: Option<Track>,
    pub label: Option<Label>,
    pub release_group: Option<ReleaseGroup>,
    pub cdstub: Option<CDStub>,
    pub artist_results: ResultList<Artist>,
    pub release_results: ResultList<Release>,
    pub track_results: ResultList<Track>,
    pub label_results: ResultList<Label>,
    pub release_group_results: ResultList<ReleaseGroup>,
    pub users: Vec<User>,
}

impl From<Artist> for Metadata {
    fn from(artist: Artist) -> Self {
        Self {
            artist: Some(artist),
            ..Default::default()
        }
    }
}

impl From<Release> for Metadata {
    fn from(release: Release) -> Self {
        Self {
            release: Some(release),
            ..Default::default()
        }
    }
}

impl From<Track> for Metadata {
    fn from(track: Track) -> Self {
        Self {
            track: Some(track),
            ..Default::default()
        }
    }
}

impl From<Label> for Metadata {
    fn from(label: Label) -> Self {
        Self {
            label: Some(label),
            ..Default::default()
        }
    }
}

impl From<ReleaseGroup> for Metadata {
    fn from(release_group: ReleaseGroup) -> Self {
        Self {
            release_group: Some(release_group),
            ..Default::default()
        }
    }
}
