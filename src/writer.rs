/// The writer module serializes the domain model back into an MMD document.
///
/// Ids go out as bare UUIDs and type URIs as fragments of their namespace, the parser turns them
/// back into absolute URIs. Unset fields and empty lists are left out. The writer doesn't check
/// its input: whatever a hand-built graph holds is written as far as it can be expressed.
use crate::common::*;
use crate::config::Config;
use crate::error::{MmdError, Result};
use crate::identifiers::{extract_fragment, extract_uuid_for_host, EntityType};
use crate::model::*;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::Write;

type Attrs = Vec<(&'static str, String)>;

#[derive(Debug, Clone)]
pub struct MbXmlWriter {
    host: String,
    indent: usize,
    xml_declaration: bool,
}

impl Default for MbXmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MbXmlWriter {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            host: config.host.clone(),
            indent: config.indent,
            xml_declaration: config.xml_declaration,
        }
    }

    /// Writes `metadata` as one UTF-8 document to `out`.
    pub fn write<W: Write>(&self, out: W, metadata: &Metadata) -> Result<()> {
        let xml = if self.indent > 0 {
            Writer::new_with_indent(out, b' ', self.indent)
        } else {
            Writer::new(out)
        };
        let mut emitter = Emitter { xml, host: &self.host };

        if self.xml_declaration {
            emitter.xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        emitter.write_metadata(metadata)?;
        emitter.xml.get_mut().write_all(b"\n")?;
        Ok(())
    }

    pub fn to_bytes(&self, metadata: &Metadata) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf, metadata)?;
        Ok(buf)
    }

    pub fn to_string(&self, metadata: &Metadata) -> Result<String> {
        let bytes = self.to_bytes(metadata)?;
        String::from_utf8(bytes)
            .map_err(|e| MmdError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

fn element<'a>(name: &'a str, attrs: &'a Attrs) -> BytesStart<'a> {
    let mut elem = BytesStart::new(name);
    for (key, value) in attrs {
        elem.push_attribute(attribute(key, value));
    }
    elem
}

/// An attribute with its value escaped. Whitespace other than a plain space is written as a
/// character reference, a literal one would be normalised to a space when read back.
fn attribute<'a>(key: &'a str, value: &str) -> Attribute<'a> {
    let escaped = escape(value)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;");
    Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(escaped.into_bytes()),
    }
}

struct Emitter<'a, W: Write> {
    xml: Writer<W>,
    host: &'a str,
}

impl<W: Write> Emitter<'_, W> {
    fn start(&mut self, name: &str, attrs: &Attrs) -> Result<()> {
        self.xml.write_event(Event::Start(element(name, attrs)))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.xml.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &Attrs) -> Result<()> {
        self.xml.write_event(Event::Empty(element(name, attrs)))?;
        Ok(())
    }

    /// `<name attrs>text</name>`, or an empty element when there is no text.
    fn text_element(&mut self, name: &str, attrs: &Attrs, text: Option<&str>) -> Result<()> {
        match text.filter(|t| !t.is_empty()) {
            Some(text) => {
                self.start(name, attrs)?;
                let escaped = escape(text).replace('\r', "&#13;");
                self.xml.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
                self.end(name)
            }
            None => self.empty(name, attrs),
        }
    }

    /// Writes a text-only child, nothing at all if `text` is unset or empty.
    fn field(&mut self, name: &str, text: Option<&str>) -> Result<()> {
        match text.filter(|t| !t.is_empty()) {
            Some(text) => self.text_element(name, &Vec::new(), Some(text)),
            None => Ok(()),
        }
    }

    fn list<T>(
        &mut self,
        name: &str,
        attrs: &Attrs,
        items: &[T],
        mut write_item: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        if items.is_empty() && attrs.is_empty() {
            return Ok(());
        }
        self.start(name, attrs)?;
        for item in items {
            write_item(self, item)?;
        }
        self.end(name)
    }

    fn short_id(&self, id: &str, kind: EntityType) -> String {
        extract_uuid_for_host(self.host, id, Some(kind)).unwrap_or_else(|_| id.to_string())
    }

    fn id_attrs(&self, id: Option<&str>, kind: EntityType, score: Option<u8>) -> Attrs {
        let mut attrs = Attrs::new();
        if let Some(id) = id {
            attrs.push(("id", self.short_id(id, kind)));
        }
        if let Some(score) = score {
            attrs.push(("ext:score", score.to_string()));
        }
        attrs
    }

    fn write_metadata(&mut self, md: &Metadata) -> Result<()> {
        let attrs = vec![("xmlns", NS_MMD_1.to_string()), ("xmlns:ext", NS_EXT_1.to_string())];
        self.start("metadata", &attrs)?;

        if let Some(artist) = &md.artist {
            self.write_artist(artist, None)?;
        }
        if let Some(release) = &md.release {
            self.write_release(release, None)?;
        }
        if let Some(track) = &md.track {
            self.write_track(track, None)?;
        }
        if let Some(label) = &md.label {
            self.write_label(label, None)?;
        }
        if let Some(release_group) = &md.release_group {
            self.write_release_group(release_group, None)?;
        }
        if let Some(cdstub) = &md.cdstub {
            self.write_cdstub(cdstub)?;
        }

        self.write_results("artist-list", &md.artist_results, Self::write_artist)?;
        self.write_results("release-list", &md.release_results, Self::write_release)?;
        self.write_results("track-list", &md.track_results, Self::write_track)?;
        self.write_results("label-list", &md.label_results, Self::write_label)?;
        self.write_results("release-group-list", &md.release_group_results, Self::write_release_group)?;

        if !md.users.is_empty() {
            self.start("ext:user-list", &Attrs::new())?;
            for user in &md.users {
                self.write_user(user)?;
            }
            self.end("ext:user-list")?;
        }

        self.end("metadata")
    }

    fn write_results<T>(
        &mut self,
        name: &str,
        results: &ResultList<T>,
        write_item: impl Fn(&mut Self, &T, Option<u8>) -> Result<()>,
    ) -> Result<()> {
        let attrs = window_attrs(results.offset, results.count);
        self.list(name, &attrs, &results.items, |w, r| write_item(w, &r.entity, r.score))
    }

    fn write_artist(&mut self, artist: &Artist, score: Option<u8>) -> Result<()> {
        let mut attrs = self.id_attrs(artist.id.as_deref(), EntityType::Artist, score);
        if let Some(t) = &artist.artist_type {
            attrs.push(("type", fragment(t, NS_MMD_1)));
        }

        self.start("artist", &attrs)?;
        self.field("name", artist.name.as_deref())?;
        self.field("sort-name", artist.sort_name.as_deref())?;
        self.field("disambiguation", artist.disambiguation.as_deref())?;
        self.write_life_span(artist.begin_date.as_deref(), artist.end_date.as_deref())?;
        self.list("alias-list", &Attrs::new(), &artist.aliases, Self::write_alias)?;
        self.list("release-list", &Attrs::new(), &artist.releases, |w, r| w.write_release(r, None))?;
        self.list("release-group-list", &Attrs::new(), &artist.release_groups, |w, rg| {
            w.write_release_group(rg, None)
        })?;
        self.write_entity_extras(artist, artist.rating.as_ref())?;
        self.end("artist")
    }

    fn write_release(&mut self, release: &Release, score: Option<u8>) -> Result<()> {
        let mut attrs = self.id_attrs(release.id.as_deref(), EntityType::Release, score);
        if !release.types.is_empty() {
            attrs.push(("type", fragment_list(&release.types, NS_MMD_1)));
        }

        self.start("release", &attrs)?;
        self.field("title", release.title.as_deref())?;
        if release.text_language.is_some() || release.text_script.is_some() {
            let mut attrs = Attrs::new();
            push_opt(&mut attrs, "language", release.text_language.as_deref());
            push_opt(&mut attrs, "script", release.text_script.as_deref());
            self.empty("text-representation", &attrs)?;
        }
        self.field("asin", release.asin.as_deref())?;
        if let Some(artist) = &release.artist {
            self.write_artist(artist, None)?;
        }
        if let Some(release_group) = &release.release_group {
            self.write_release_group(release_group, None)?;
        }
        self.list("release-event-list", &Attrs::new(), &release.release_events, Self::write_release_event)?;
        self.list("disc-list", &Attrs::new(), &release.discs, Self::write_disc)?;
        let track_window = window_attrs(release.tracks_offset, release.tracks_count);
        self.list("track-list", &track_window, &release.tracks, |w, t| w.write_track(t, None))?;
        self.write_entity_extras(release, release.rating.as_ref())?;
        self.end("release")
    }

    fn write_track(&mut self, track: &Track, score: Option<u8>) -> Result<()> {
        let attrs = self.id_attrs(track.id.as_deref(), EntityType::Track, score);

        self.start("track", &attrs)?;
        self.field("title", track.title.as_deref())?;
        self.field("duration", track.duration.map(|d| d.to_string()).as_deref())?;
        if let Some(artist) = &track.artist {
            self.write_artist(artist, None)?;
        }
        self.list("release-list", &Attrs::new(), &track.releases, |w, r| w.write_release(r, None))?;
        self.list("puid-list", &Attrs::new(), &track.puids, |w, id| w.empty("puid", &vec![("id", id.clone())]))?;
        self.list("trmid-list", &Attrs::new(), &track.trm_ids, |w, id| {
            w.empty("trmid", &vec![("id", id.clone())])
        })?;
        self.write_entity_extras(track, track.rating.as_ref())?;
        self.end("track")
    }

    fn write_label(&mut self, label: &Label, score: Option<u8>) -> Result<()> {
        let mut attrs = self.id_attrs(label.id.as_deref(), EntityType::Label, score);
        if let Some(t) = &label.label_type {
            attrs.push(("type", fragment(t, NS_MMD_1)));
        }

        self.start("label", &attrs)?;
        self.field("name", label.name.as_deref())?;
        self.field("sort-name", label.sort_name.as_deref())?;
        self.field("disambiguation", label.disambiguation.as_deref())?;
        self.field("label-code", label.code.as_deref())?;
        self.field("country", label.country.as_deref())?;
        self.write_life_span(label.begin_date.as_deref(), label.end_date.as_deref())?;
        self.list("alias-list", &Attrs::new(), &label.aliases, Self::write_alias)?;
        self.write_entity_extras(label, label.rating.as_ref())?;
        self.end("label")
    }

    fn write_release_group(&mut self, release_group: &ReleaseGroup, score: Option<u8>) -> Result<()> {
        let mut attrs = self.id_attrs(release_group.id.as_deref(), EntityType::ReleaseGroup, score);
        if let Some(t) = &release_group.group_type {
            attrs.push(("type", fragment(t, NS_MMD_1)));
        }

        self.start("release-group", &attrs)?;
        self.field("title", release_group.title.as_deref())?;
        if let Some(artist) = &release_group.artist {
            self.write_artist(artist, None)?;
        }
        self.list("release-list", &Attrs::new(), &release_group.releases, |w, r| {
            w.write_release(r, None)
        })?;
        self.write_entity_extras(release_group, release_group.rating.as_ref())?;
        self.end("release-group")
    }

    /// Relations, tags and rating, in that order.
    fn write_entity_extras<E: Entity>(&mut self, entity: &E, rating: Option<&Rating>) -> Result<()> {
        for target_type in entity.relation_target_types() {
            let attrs = vec![("target-type", target_type.fragment().to_string())];
            self.list("relation-list", &attrs, entity.relations_to(target_type), Self::write_relation)?;
        }
        self.list("tag-list", &Attrs::new(), entity.tags(), |w, tag| {
            w.text_element("tag", &vec![("count", tag.count.to_string())], Some(tag.value.as_str()))
        })?;
        if let Some(rating) = rating {
            let mut attrs = Attrs::new();
            push_opt(&mut attrs, "votes-count", rating.count.map(|c| c.to_string()).as_deref());
            self.text_element("rating", &attrs, rating.value.map(|v| v.to_string()).as_deref())?;
        }
        Ok(())
    }

    fn write_relation(&mut self, relation: &Relation) -> Result<()> {
        let mut attrs = Attrs::new();
        if let Some(t) = &relation.relation_type {
            attrs.push(("type", fragment(t, NS_REL_1)));
        }
        if let Some(target) = &relation.target_id {
            let target = match relation.target_type.and_then(|tt| tt.entity_type()) {
                Some(kind) => self.short_id(target, kind),
                None => target.clone(),
            };
            attrs.push(("target", target));
        }
        if relation.direction != Direction::Both {
            attrs.push(("direction", relation.direction.to_string()));
        }
        if !relation.attributes.is_empty() {
            attrs.push(("attributes", fragment_list(&relation.attributes, NS_REL_1)));
        }
        push_opt(&mut attrs, "begin", relation.begin_date.as_deref());
        push_opt(&mut attrs, "end", relation.end_date.as_deref());

        match &relation.target {
            None => self.empty("relation", &attrs),
            Some(target) => {
                self.start("relation", &attrs)?;
                match target {
                    RelationTarget::Artist(a) => self.write_artist(a, None)?,
                    RelationTarget::Release(r) => self.write_release(r, None)?,
                    RelationTarget::Track(t) => self.write_track(t, None)?,
                    RelationTarget::Label(l) => self.write_label(l, None)?,
                }
                self.end("relation")
            }
        }
    }

    fn write_life_span(&mut self, begin: Option<&str>, end: Option<&str>) -> Result<()> {
        if begin.is_none() && end.is_none() {
            return Ok(());
        }
        let mut attrs = Attrs::new();
        push_opt(&mut attrs, "begin", begin);
        push_opt(&mut attrs, "end", end);
        self.empty("life-span", &attrs)
    }

    fn write_alias(&mut self, alias: &ArtistAlias) -> Result<()> {
        let mut attrs = Attrs::new();
        if let Some(t) = &alias.alias_type {
            attrs.push(("type", fragment(t, NS_MMD_1)));
        }
        push_opt(&mut attrs, "script", alias.script.as_deref());
        self.text_element("alias", &attrs, alias.value.as_deref())
    }

    fn write_release_event(&mut self, event: &ReleaseEvent) -> Result<()> {
        let mut attrs = Attrs::new();
        push_opt(&mut attrs, "date", event.date.as_deref());
        push_opt(&mut attrs, "country", event.country.as_deref());
        push_opt(&mut attrs, "catalog-number", event.catalog_number.as_deref());
        push_opt(&mut attrs, "barcode", event.barcode.as_deref());
        if let Some(format) = &event.format {
            attrs.push(("format", fragment(format, NS_MMD_1)));
        }

        match &event.label {
            None => self.empty("event", &attrs),
            Some(label) => {
                self.start("event", &attrs)?;
                self.write_label(label, None)?;
                self.end("event")
            }
        }
    }

    fn write_disc(&mut self, disc: &Disc) -> Result<()> {
        let mut attrs = Attrs::new();
        push_opt(&mut attrs, "id", disc.id.as_deref());
        push_opt(&mut attrs, "sectors", disc.sectors.map(|s| s.to_string()).as_deref());
        self.empty("disc", &attrs)
    }

    fn write_user(&mut self, user: &User) -> Result<()> {
        let mut attrs = Attrs::new();
        if !user.types.is_empty() {
            attrs.push(("type", fragment_list(&user.types, NS_EXT_1)));
        }

        self.start("ext:user", &attrs)?;
        self.field("name", user.name.as_deref())?;
        if let Some(show) = user.show_nag {
            self.empty("ext:nag", &vec![("show", show.to_string())])?;
        }
        self.end("ext:user")
    }

    fn write_cdstub(&mut self, stub: &CDStub) -> Result<()> {
        let mut attrs = Attrs::new();
        push_opt(&mut attrs, "id", stub.id.as_deref());

        self.start("cdstub", &attrs)?;
        self.field("title", stub.title.as_deref())?;
        self.field("artist", stub.artist.as_deref())?;
        self.field("barcode", stub.barcode.as_deref())?;
        self.field("comment", stub.comment.as_deref())?;
        self.list("track-list", &Attrs::new(), &stub.tracks, |w, track| {
            w.start("track", &Attrs::new())?;
            w.field("title", track.title.as_deref())?;
            w.field("artist", track.artist.as_deref())?;
            w.field("duration", track.duration.map(|d| d.to_string()).as_deref())?;
            w.end("track")
        })?;
        self.end("cdstub")
    }
}

fn push_opt(attrs: &mut Attrs, name: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        attrs.push((name, value.to_string()));
    }
}

fn window_attrs(offset: Option<u32>, count: Option<u32>) -> Attrs {
    let mut attrs = Attrs::new();
    push_opt(&mut attrs, "offset", offset.map(|o| o.to_string()).as_deref());
    push_opt(&mut attrs, "count", count.map(|c| c.to_string()).as_deref());
    attrs
}

/// Shortens `uri` to its fragment if it lives in namespace `prefix`, else keeps it whole.
fn fragment(uri: &str, prefix: &str) -> String {
    extract_fragment(uri, Some(prefix)).unwrap_or_else(|_| uri.to_string())
}

fn fragment_list(uris: &[String], prefix: &str) -> String {
    uris.iter().map(|u| fragment(u, prefix)).collect::<Vec<_>>().join(" ")
}
