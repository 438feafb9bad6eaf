/// The parser module reads Music Metadata XML (MMD) documents into the domain model.
///
/// The parser is permissive: a document has to be well-formed and carry a `metadata` element in
/// the MMD namespace, but anything inside it that doesn't have the expected shape is skipped.
/// A bad date, an id on the wrong host or an out-of-range score leaves that one field unset, and
/// a relation without type, target type or target is dropped. Only a broken document or a missing
/// root element make `parse` fail.
use crate::common::*;
use crate::config::Config;
use crate::error::{ParseError, Result};
use crate::factory::{DefaultFactory, ObjectFactory};
use crate::identifiers::{entity_prefix, extract_uuid_for_host, make_absolute, EntityType};
use crate::model::*;
use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::{Document, Node};
use std::borrow::Cow;
use std::io::Read;
use tracing::{debug, trace};

/// The elements the parser understands, keyed by namespace and local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Elem {
    Metadata,
    Artist,
    Release,
    Track,
    Label,
    ReleaseGroup,
    CDStub,
    ArtistList,
    ReleaseList,
    TrackList,
    LabelList,
    ReleaseGroupList,
    Name,
    SortName,
    Disambiguation,
    LifeSpan,
    AliasList,
    Alias,
    Title,
    TextRepresentation,
    Asin,
    ReleaseEventList,
    Event,
    DiscList,
    Disc,
    Duration,
    PuidList,
    Puid,
    TrmIdList,
    TrmId,
    RelationList,
    Relation,
    TagList,
    Tag,
    Rating,
    Country,
    LabelCode,
    Barcode,
    Comment,
    UserList,
    User,
    Nag,
}

impl Elem {
    fn classify(node: Node) -> Option<Elem> {
        if !node.is_element() {
            return None;
        }
        let name = node.tag_name();
        let elem = match (name.namespace(), name.name()) {
            (Some(NS_MMD_1), "metadata") => Elem::Metadata,
            (Some(NS_MMD_1), "artist") => Elem::Artist,
            (Some(NS_MMD_1), "release") => Elem::Release,
            (Some(NS_MMD_1), "track") => Elem::Track,
            (Some(NS_MMD_1), "label") => Elem::Label,
            (Some(NS_MMD_1), "release-group") => Elem::ReleaseGroup,
            (Some(NS_MMD_1), "cdstub") => Elem::CDStub,
            (Some(NS_MMD_1), "artist-list") => Elem::ArtistList,
            (Some(NS_MMD_1), "release-list") => Elem::ReleaseList,
            (Some(NS_MMD_1), "track-list") => Elem::TrackList,
            (Some(NS_MMD_1), "label-list") => Elem::LabelList,
            (Some(NS_MMD_1), "release-group-list") => Elem::ReleaseGroupList,
            (Some(NS_MMD_1), "name") => Elem::Name,
            (Some(NS_MMD_1), "sort-name") => Elem::SortName,
            (Some(NS_MMD_1), "disambiguation") => Elem::Disambiguation,
            (Some(NS_MMD_1), "life-span") => Elem::LifeSpan,
            (Some(NS_MMD_1), "alias-list") => Elem::AliasList,
            (Some(NS_MMD_1), "alias") => Elem::Alias,
            (Some(NS_MMD_1), "title") => Elem::Title,
            (Some(NS_MMD_1), "text-representation") => Elem::TextRepresentation,
            (Some(NS_MMD_1), "asin") => Elem::Asin,
            (Some(NS_MMD_1), "release-event-list") => Elem::ReleaseEventList,
            (Some(NS_MMD_1), "event") => Elem::Event,
            (Some(NS_MMD_1), "disc-list") => Elem::DiscList,
            (Some(NS_MMD_1), "disc") => Elem::Disc,
            (Some(NS_MMD_1), "duration") => Elem::Duration,
            (Some(NS_MMD_1), "puid-list") => Elem::PuidList,
            (Some(NS_MMD_1), "puid") => Elem::Puid,
            (Some(NS_MMD_1), "trmid-list") => Elem::TrmIdList,
            (Some(NS_MMD_1), "trmid") => Elem::TrmId,
            (Some(NS_MMD_1), "relation-list") => Elem::RelationList,
            (Some(NS_MMD_1), "relation") => Elem::Relation,
            (Some(NS_MMD_1), "tag-list") => Elem::TagList,
            (Some(NS_MMD_1), "tag") => Elem::Tag,
            (Some(NS_MMD_1), "rating") => Elem::Rating,
            (Some(NS_MMD_1), "country") => Elem::Country,
            (Some(NS_MMD_1), "label-code") => Elem::LabelCode,
            (Some(NS_MMD_1), "barcode") => Elem::Barcode,
            (Some(NS_MMD_1), "comment") => Elem::Comment,
            (Some(NS_EXT_1), "user-list") => Elem::UserList,
            (Some(NS_EXT_1), "user") => Elem::User,
            (Some(NS_EXT_1), "nag") => Elem::Nag,
            _ => return None,
        };
        Some(elem)
    }
}

/// Parses MMD documents, building every value through an [`ObjectFactory`].
#[derive(Debug, Clone)]
pub struct MbXmlParser<F: ObjectFactory = DefaultFactory> {
    factory: F,
    host: String,
}

impl MbXmlParser<DefaultFactory> {
    pub fn new() -> Self {
        Self::with_factory(DefaultFactory)
    }
}

impl Default for MbXmlParser<DefaultFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ObjectFactory> MbXmlParser<F> {
    pub fn with_factory(factory: F) -> Self {
        Self {
            factory,
            host: DEFAULT_HOST.to_string(),
        }
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.host = config.host.clone();
        self
    }

    /// Reads `reader` to the end and parses it. Read failures are returned as `MmdError::Io`.
    pub fn parse<R: Read>(&self, mut reader: R) -> Result<Metadata> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        self.parse_bytes(&buf)
    }

    /// Parses a document in the encoding its XML declaration names. UTF-8 (the default),
    /// ISO-8859-1 and US-ASCII are understood, any other encoding is a `ParseError`.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Metadata> {
        let text = decode_document(bytes).map_err(|e| {
            debug!("{}", e.msg);
            e
        })?;
        self.parse_str(&text)
    }

    pub fn parse_str(&self, text: &str) -> Result<Metadata> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let doc = Document::parse(text).map_err(|e| {
            debug!("malformed document: {e}");
            ParseError::from(e)
        })?;

        let root = doc
            .descendants()
            .find(|n| Elem::classify(*n) == Some(Elem::Metadata))
            .ok_or_else(|| {
                debug!("cannot find root element mmd:metadata");
                ParseError::new("cannot find root element mmd:metadata")
            })?;

        Ok(self.create_metadata(root))
    }

    fn create_metadata(&self, node: Node) -> Metadata {
        let mut md = Metadata::default();

        for child in child_elements(node) {
            match Elem::classify(child) {
                Some(Elem::Artist) => md.artist = Some(self.create_artist(child)),
                Some(Elem::Release) => md.release = Some(self.create_release(child)),
                Some(Elem::Track) => md.track = Some(self.create_track(child)),
                Some(Elem::Label) => md.label = Some(self.create_label(child)),
                Some(Elem::ReleaseGroup) => md.release_group = Some(self.create_release_group(child)),
                Some(Elem::CDStub) => md.cdstub = Some(self.create_cdstub(child)),
                Some(Elem::ArtistList) => {
                    self.add_results(child, Elem::Artist, &mut md.artist_results, Self::create_artist)
                }
                Some(Elem::ReleaseList) => {
                    self.add_results(child, Elem::Release, &mut md.release_results, Self::create_release)
                }
                Some(Elem::TrackList) => {
                    self.add_results(child, Elem::Track, &mut md.track_results, Self::create_track)
                }
                Some(Elem::LabelList) => {
                    self.add_results(child, Elem::Label, &mut md.label_results, Self::create_label)
                }
                Some(Elem::ReleaseGroupList) => self.add_results(
                    child,
                    Elem::ReleaseGroup,
                    &mut md.release_group_results,
                    Self::create_release_group,
                ),
                Some(Elem::UserList) => md.users.extend(self.create_list(child, Elem::User, Self::create_user)),
                _ => trace!("skipping unknown element {:?} in metadata", child.tag_name().name()),
            }
        }

        md
    }

    fn add_results<T>(
        &self,
        list: Node,
        item: Elem,
        results: &mut ResultList<T>,
        create: impl Fn(&Self, Node) -> T,
    ) {
        results.offset = get_count_attr(list, "offset");
        results.count = get_count_attr(list, "count");

        for child in child_elements(list).filter(|c| Elem::classify(*c) == Some(item)) {
            let score = get_score_attr(child);
            results.push(create(self, child), score);
        }
    }

    fn create_list<T>(&self, list: Node, item: Elem, create: impl Fn(&Self, Node) -> T) -> Vec<T> {
        child_elements(list)
            .filter(|c| Elem::classify(*c) == Some(item))
            .map(|c| create(self, c))
            .collect()
    }

    fn create_artist(&self, node: Node) -> Artist {
        let mut artist = self.factory.new_artist();
        artist.id = self.get_id_attr(node, "id", EntityType::Artist);
        artist.artist_type = get_uri_attr(node, "type", NS_MMD_1);

        for child in child_elements(node) {
            match Elem::classify(child) {
                Some(Elem::Name) => artist.name = get_text(child),
                Some(Elem::SortName) => artist.sort_name = get_text(child),
                Some(Elem::Disambiguation) => artist.disambiguation = get_text(child),
                Some(Elem::LifeSpan) => {
                    artist.begin_date = get_date_attr(child, "begin");
                    artist.end_date = get_date_attr(child, "end");
                }
                Some(Elem::AliasList) => artist.aliases.extend(self.create_aliases(child, F::new_artist_alias)),
                Some(Elem::ReleaseList) => {
                    artist.releases.extend(self.create_list(child, Elem::Release, Self::create_release))
                }
                Some(Elem::ReleaseGroupList) => artist.release_groups.extend(self.create_list(
                    child,
                    Elem::ReleaseGroup,
                    Self::create_release_group,
                )),
                Some(Elem::RelationList) => self.add_relations(child, &mut artist),
                Some(Elem::TagList) => self.add_tags(child, &mut artist),
                Some(Elem::Rating) => artist.rating = self.create_rating(child),
                _ => {}
            }
        }

        artist
    }

    fn create_release(&self, node: Node) -> Release {
        let mut release = self.factory.new_release();
        release.id = self.get_id_attr(node, "id", EntityType::Release);
        for t in get_uri_list_attr(node, "type", NS_MMD_1) {
            release.add_type(&t);
        }

        for child in child_elements(node) {
            match Elem::classify(child) {
                Some(Elem::Title) => release.title = get_text(child),
                Some(Elem::TextRepresentation) => {
                    release.text_language = get_attr(child, "language", Some(&*LANGUAGE_REGEX));
                    release.text_script = get_attr(child, "script", Some(&*SCRIPT_REGEX));
                }
                Some(Elem::Asin) => release.asin = get_text(child),
                Some(Elem::Artist) => release.artist = Some(Box::new(self.create_artist(child))),
                Some(Elem::ReleaseGroup) => {
                    release.release_group = Some(Box::new(self.create_release_group(child)))
                }
                Some(Elem::ReleaseEventList) => release.release_events.extend(self.create_release_events(child)),
                Some(Elem::DiscList) => release.discs.extend(self.create_discs(child)),
                Some(Elem::TrackList) => {
                    release.tracks_offset = get_count_attr(child, "offset");
                    release.tracks_count = get_count_attr(child, "count");
                    release.tracks.extend(self.create_list(child, Elem::Track, Self::create_track));
                }
                Some(Elem::RelationList) => self.add_relations(child, &mut release),
                Some(Elem::TagList) => self.add_tags(child, &mut release),
                Some(Elem::Rating) => release.rating = self.create_rating(child),
                _ => {}
            }
        }

        release
    }

    fn create_track(&self, node: Node) -> Track {
        let mut track = self.factory.new_track();
        track.id = self.get_id_attr(node, "id", EntityType::Track);

        for child in child_elements(node) {
            match Elem::classify(child) {
                Some(Elem::Title) => track.title = get_text(child),
                Some(Elem::Artist) => track.artist = Some(Box::new(self.create_artist(child))),
                Some(Elem::Duration) => track.duration = get_positive_int_text(child),
                Some(Elem::ReleaseList) => {
                    track.releases.extend(self.create_list(child, Elem::Release, Self::create_release))
                }
                Some(Elem::PuidList) => track.puids.extend(get_child_ids(child, Elem::Puid)),
                Some(Elem::TrmIdList) => track.trm_ids.extend(get_child_ids(child, Elem::TrmId)),
                Some(Elem::RelationList) => self.add_relations(child, &mut track),
                Some(Elem::TagList) => self.add_tags(child, &mut track),
                Some(Elem::Rating) => track.rating = self.create_rating(child),
                _ => {}
            }
        }

        track
    }

    fn create_label(&self, node: Node) -> Label {
        let mut label = self.factory.new_label();
        label.id = self.get_id_attr(node, "id", EntityType::Label);
        label.label_type = get_uri_attr(node, "type", NS_MMD_1);

        for child in child_elements(node) {
            match Elem::classify(child) {
                Some(Elem::Name) => label.name = get_text(child),
                Some(Elem::SortName) => label.sort_name = get_text(child),
                Some(Elem::Disambiguation) => label.disambiguation = get_text(child),
                Some(Elem::LabelCode) => label.code = get_text(child),
                Some(Elem::Country) => {
                    label.country = get_text(child).filter(|c| COUNTRY_REGEX.is_match(c));
                }
                Some(Elem::LifeSpan) => {
                    label.begin_date = get_date_attr(child, "begin");
                    label.end_date = get_date_attr(child, "end");
                }
                Some(Elem::AliasList) => label.aliases.extend(self.create_aliases(child, F::new_label_alias)),
                Some(Elem::RelationList) => self.add_relations(child, &mut label),
                Some(Elem::TagList) => self.add_tags(child, &mut label),
                Some(Elem::Rating) => label.rating = self.create_rating(child),
                _ => {}
            }
        }

        label
    }

    fn create_release_group(&self, node: Node) -> ReleaseGroup {
        let mut release_group = self.factory.new_release_group();
        release_group.id = self.get_id_attr(node, "id", EntityType::ReleaseGroup);
        release_group.group_type = get_uri_attr(node, "type", NS_MMD_1);

        for child in child_elements(node) {
            match Elem::classify(child) {
                Some(Elem::Title) => release_group.title = get_text(child),
                Some(Elem::Artist) => release_group.artist = Some(Box::new(self.create_artist(child))),
                Some(Elem::ReleaseList) => release_group
                    .releases
                    .extend(self.create_list(child, Elem::Release, Self::create_release)),
                Some(Elem::RelationList) => self.add_relations(child, &mut release_group),
                Some(Elem::TagList) => self.add_tags(child, &mut release_group),
                Some(Elem::Rating) => release_group.rating = self.create_rating(child),
                _ => {}
            }
        }

        release_group
    }

    fn create_release_events(&self, list: Node) -> Vec<ReleaseEvent> {
        let mut events = Vec::new();

        for node in child_elements(list).filter(|c| Elem::classify(*c) == Some(Elem::Event)) {
            // The date is mandatory, an event without one tells nothing.
            let Some(date) = get_date_attr(node, "date") else {
                trace!("skipping release event without a valid date");
                continue;
            };

            let mut event = self.factory.new_release_event();
            event.date = Some(date);
            event.country = get_attr(node, "country", Some(&*COUNTRY_REGEX));
            event.catalog_number = get_attr(node, "catalog-number", None);
            event.barcode = get_attr(node, "barcode", None);
            event.format = get_uri_attr(node, "format", NS_MMD_1);
            event.label = child_elements(node)
                .find(|c| Elem::classify(*c) == Some(Elem::Label))
                .map(|c| self.create_label(c));
            events.push(event);
        }

        events
    }

    fn create_discs(&self, list: Node) -> Vec<Disc> {
        child_elements(list)
            .filter(|c| Elem::classify(*c) == Some(Elem::Disc))
            .filter_map(|node| {
                let id = get_attr(node, "id", None)?;
                let mut disc = self.factory.new_disc();
                disc.id = Some(id);
                disc.sectors = get_positive_int_attr(node, "sectors");
                Some(disc)
            })
            .collect()
    }

    fn create_aliases(&self, list: Node, new_alias: impl Fn(&F) -> ArtistAlias) -> Vec<ArtistAlias> {
        child_elements(list)
            .filter(|c| Elem::classify(*c) == Some(Elem::Alias))
            .map(|node| {
                let mut alias = new_alias(&self.factory);
                alias.value = get_text(node);
                alias.alias_type = get_uri_attr(node, "type", NS_MMD_1);
                alias.script = get_attr(node, "script", Some(&*SCRIPT_REGEX));
                alias
            })
            .collect()
    }

    fn add_tags<E: Entity>(&self, list: Node, entity: &mut E) {
        for node in child_elements(list).filter(|c| Elem::classify(*c) == Some(Elem::Tag)) {
            let Some(value) = get_text(node) else {
                trace!("skipping empty tag");
                continue;
            };
            let mut tag = self.factory.new_tag();
            tag.value = value;
            tag.count = get_positive_int_attr(node, "count")
                .and_then(|c| u32::try_from(c).ok())
                .unwrap_or(1);
            entity.add_tag(tag);
        }
    }

    fn create_rating(&self, node: Node) -> Option<Rating> {
        let mut rating = self.factory.new_rating();
        rating.value = get_text(node).and_then(|t| t.trim().parse::<f32>().ok()).filter(|v| v.is_finite());
        rating.count = get_count_attr(node, "votes-count");
        if rating.value.is_none() && rating.count.is_none() {
            trace!("skipping empty rating");
            return None;
        }
        Some(rating)
    }

    fn create_user(&self, node: Node) -> User {
        let mut user = self.factory.new_user();
        user.types.extend(get_uri_list_attr(node, "type", NS_EXT_1));

        for child in child_elements(node) {
            match Elem::classify(child) {
                Some(Elem::Name) => user.name = get_text(child),
                Some(Elem::Nag) => user.show_nag = get_boolean_attr(child, "show"),
                _ => {}
            }
        }

        user
    }

    fn create_cdstub(&self, node: Node) -> CDStub {
        let mut stub = self.factory.new_cdstub();
        stub.id = get_attr(node, "id", None);

        for child in child_elements(node) {
            match Elem::classify(child) {
                Some(Elem::Title) => stub.title = get_text(child),
                Some(Elem::Artist) => stub.artist = get_text(child),
                Some(Elem::Barcode) => stub.barcode = get_text(child),
                Some(Elem::Comment) => stub.comment = get_text(child),
                Some(Elem::TrackList) => {
                    for track_node in child_elements(child).filter(|c| Elem::classify(*c) == Some(Elem::Track)) {
                        let mut track = CDStubTrack::default();
                        for field in child_elements(track_node) {
                            match Elem::classify(field) {
                                Some(Elem::Title) => track.title = get_text(field),
                                Some(Elem::Artist) => track.artist = get_text(field),
                                Some(Elem::Duration) => track.duration = get_positive_int_text(field),
                                _ => {}
                            }
                        }
                        stub.tracks.push(track);
                    }
                }
                _ => {}
            }
        }

        stub
    }

    fn add_relations<E: Entity>(&self, list: Node, entity: &mut E) {
        let Some(target_type_uri) = get_uri_attr(list, "target-type", NS_REL_1) else {
            trace!("skipping relation list without target type");
            return;
        };
        let Some(target_type) = RelationTargetType::from_uri(&target_type_uri) else {
            trace!("skipping relation list with unknown target type {target_type_uri}");
            return;
        };

        for node in child_elements(list).filter(|c| Elem::classify(*c) == Some(Elem::Relation)) {
            match self.create_relation(node, target_type) {
                Some(relation) => {
                    entity.add_relation(relation);
                }
                None => trace!("dropping relation without type or target"),
            }
        }
    }

    fn create_relation(&self, node: Node, target_type: RelationTargetType) -> Option<Relation> {
        let mut relation = self.factory.new_relation();
        relation.relation_type = get_uri_attr(node, "type", NS_REL_1);
        relation.target_type = Some(target_type);
        relation.target_id = match target_type.entity_type() {
            Some(kind) => self.get_id_attr(node, "target", kind),
            None => get_attr(node, "target", None)
                .filter(|t| !t.is_empty())
                .map(|t| make_absolute(&entity_prefix(&self.host, target_type.entity_kind()), &t)),
        };

        if !relation.is_valid() {
            return None;
        }

        relation.direction = get_attr(node, "direction", None)
            .and_then(|d| d.parse().ok())
            .unwrap_or_default();
        relation.begin_date = get_date_attr(node, "begin");
        relation.end_date = get_date_attr(node, "end");
        for attribute in get_uri_list_attr(node, "attributes", NS_REL_1) {
            relation.add_attribute(&attribute);
        }

        let children: Vec<Node> = child_elements(node).collect();
        if let [only] = children.as_slice() {
            relation.target = match Elem::classify(*only) {
                Some(Elem::Artist) => Some(RelationTarget::Artist(Box::new(self.create_artist(*only)))),
                Some(Elem::Release) => Some(RelationTarget::Release(Box::new(self.create_release(*only)))),
                Some(Elem::Track) => Some(RelationTarget::Track(Box::new(self.create_track(*only)))),
                Some(Elem::Label) => Some(RelationTarget::Label(Box::new(self.create_label(*only)))),
                _ => None,
            };
        }

        Some(relation)
    }

    /// Reads an id attribute as the canonical absolute id `http://<host>/<kind>/<rest>`. Ids that
    /// aren't valid ids of `kind` on the configured host are dropped, so are empty ones.
    fn get_id_attr(&self, node: Node, name: &str, kind: EntityType) -> Option<String> {
        let value = get_attr(node, name, None).filter(|v| !v.is_empty())?;
        let prefix = entity_prefix(&self.host, kind.as_str());
        match extract_uuid_for_host(&self.host, &make_absolute(&prefix, &value), Some(kind)) {
            Ok(rest) => {
                let id = make_absolute(&prefix, &rest);
                // A rest that reads as a URI itself can't be written back in short form.
                (!rest.is_empty() && id != rest).then_some(id)
            }
            Err(e) => {
                trace!("skipping {name} attribute: {e}");
                None
            }
        }
    }
}

static ENCODING_DECL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^<\?xml[^>]*?\sencoding\s*=\s*["']([A-Za-z0-9._-]+)["']"#).unwrap());

fn decode_document(bytes: &[u8]) -> std::result::Result<Cow<'_, str>, ParseError> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    let head_len = bytes.iter().position(|&b| b == b'>').map_or(0, |i| i + 1);
    let head = String::from_utf8_lossy(&bytes[..head_len]);
    let encoding = ENCODING_DECL_REGEX
        .captures(&head)
        .map_or_else(|| "utf-8".to_string(), |c| c[1].to_ascii_lowercase());

    match encoding.as_str() {
        "utf-8" | "utf8" => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|e| ParseError::new(format!("document is not valid UTF-8: {e}"))),
        // Both map byte for byte onto the first 256 code points.
        "iso-8859-1" | "iso_8859-1" | "latin1" | "l1" | "us-ascii" | "ascii" => {
            Ok(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()))
        }
        other => Err(ParseError::new(format!("unsupported document encoding {other}"))),
    }
}

fn child_elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// All text directly inside `node`, `None` if there is none.
fn get_text(node: Node) -> Option<String> {
    let text: String = node.children().filter(Node::is_text).filter_map(|n| n.text()).collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn get_positive_int_text(node: Node) -> Option<u64> {
    get_text(node)?.trim().parse().ok()
}

/// An attribute value, or `None` if it's missing or doesn't match `pattern`.
fn get_attr(node: Node, name: &str, pattern: Option<&Regex>) -> Option<String> {
    let value = node.attribute(name)?;
    match pattern {
        Some(re) if !re.is_match(value) => {
            trace!("skipping {name} attribute {value:?}");
            None
        }
        _ => Some(value.to_string()),
    }
}

fn get_date_attr(node: Node, name: &str) -> Option<String> {
    get_attr(node, name, Some(&*DATE_REGEX))
}

fn get_positive_int_attr(node: Node, name: &str) -> Option<u64> {
    get_attr(node, name, None)?.trim().parse().ok()
}

fn get_count_attr(node: Node, name: &str) -> Option<u32> {
    get_attr(node, name, None)?.trim().parse().ok()
}

/// The vendor `score` attribute of a search result, 0 to 100.
fn get_score_attr(node: Node) -> Option<u8> {
    let value = node.attribute((NS_EXT_1, "score"))?;
    match value.trim().parse::<i64>() {
        Ok(score @ 0..=100) => Some(score as u8),
        _ => {
            trace!("skipping score {value:?}");
            None
        }
    }
}

fn get_boolean_attr(node: Node, name: &str) -> Option<bool> {
    match node.attribute(name)? {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// A whitespace separated list of URIs. Short values are made absolute with `prefix`.
fn get_uri_list_attr(node: Node, name: &str, prefix: &str) -> Vec<String> {
    node.attribute(name)
        .map(|value| value.split_whitespace().map(|v| make_absolute(prefix, v)).collect())
        .unwrap_or_default()
}

/// The first URI of a URI list attribute.
fn get_uri_attr(node: Node, name: &str, prefix: &str) -> Option<String> {
    get_uri_list_attr(node, name, prefix).into_iter().next()
}

fn get_child_ids(list: Node, item: Elem) -> Vec<String> {
    child_elements(list)
        .filter(|c| Elem::classify(*c) == Some(item))
        .filter_map(|c| get_attr(c, "id", None))
        .collect()
}
