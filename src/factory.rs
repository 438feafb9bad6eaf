use crate::model::*;

/// Hands out the empty values the parser fills in.
///
/// Every method has a default returning `Default::default()`. Implement the trait and override
/// single methods to pre-seed values of one kind; the parser only ever mutates what it gets from
/// here through the public fields.
pub trait ObjectFactory {
    fn new_artist(&self) -> Artist {
        Artist::default()
    }

    fn new_release(&self) -> Release {
        Release::default()
    }

    fn new_track(&self) -> Track {
        Track::default()
    }

    fn new_label(&self) -> Label {
        Label::default()
    }

    fn new_release_group(&self) -> ReleaseGroup {
        ReleaseGroup::default()
    }

    fn new_relation(&self) -> Relation {
        Relation::default()
    }

    fn new_release_event(&self) -> ReleaseEvent {
        ReleaseEvent::default()
    }

    fn new_disc(&self) -> Disc {
        Disc::default()
    }

    fn new_artist_alias(&self) -> ArtistAlias {
        ArtistAlias::default()
    }

    fn new_label_alias(&self) -> LabelAlias {
        LabelAlias::default()
    }

    fn new_tag(&self) -> Tag {
        Tag::new("", 1)
    }

    fn new_rating(&self) -> Rating {
        Rating::default()
    }

    fn new_user(&self) -> User {
        User::default()
    }

    fn new_cdstub(&self) -> CDStub {
        CDStub::default()
    }
}

/// The stateless factory used unless another one is passed in. Safe to share between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl ObjectFactory for DefaultFactory {}
