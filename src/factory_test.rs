use crate::factory::*;
use crate::model::*;
use crate::parser::MbXmlParser;
use crate::testing;
use std::cell::Cell;

#[test]
fn test_default_factory_hands_out_empty_values() {
    let factory = DefaultFactory;
    assert_eq!(factory.new_artist(), Artist::default());
    assert_eq!(factory.new_release(), Release::default());
    assert_eq!(factory.new_relation(), Relation::default());
    assert_eq!(factory.new_disc(), Disc::default());
    assert_eq!(factory.new_tag(), Tag::new("", 1));
    assert_eq!(factory.new_rating(), Rating::default());
}

/// Numbers the labels it creates in their disambiguation.
#[derive(Default)]
struct CountingFactory {
    labels: Cell<usize>,
}

impl ObjectFactory for CountingFactory {
    fn new_label(&self) -> Label {
        self.labels.set(self.labels.get() + 1);
        Label {
            disambiguation: Some(format!("label #{}", self.labels.get())),
            ..Default::default()
        }
    }
}

#[test]
fn test_parser_builds_through_factory() {
    testing::init();
    let parser = MbXmlParser::with_factory(CountingFactory::default());
    let md = parser
        .parse_str(&testing::testdata("label/Atlantic_Records_1.xml"))
        .unwrap();
    let label = md.label.unwrap();
    assert_eq!(label.disambiguation.as_deref(), Some("label #1"));
    assert_eq!(label.aliases[0].value.as_deref(), Some("Atlantic"));

    // Labels nested in release events come from the factory as well.
    let md = parser
        .parse_str(&testing::testdata("release/Little_Earthquakes_2.xml"))
        .unwrap();
    let event_label = md.release.unwrap().release_events[0].label.clone().unwrap();
    assert_eq!(event_label.disambiguation.as_deref(), Some("label #2"));
}
