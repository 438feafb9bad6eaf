pub mod common;
pub mod config;
pub mod error;
pub mod factory;
pub mod identifiers;
pub mod model;
pub mod names;
pub mod parser;
pub mod writer;

pub use config::Config;
pub use error::{ConfigError, InvalidIdentifierError, MmdError, ParseError, Result};
pub use factory::{DefaultFactory, ObjectFactory};
pub use identifiers::EntityType;
pub use model::{Artist, Entity, Label, Metadata, Relation, Release, ReleaseGroup, Track};
pub use parser::MbXmlParser;
pub use writer::MbXmlWriter;

#[cfg(test)]
mod testing;

#[cfg(test)]
mod factory_test;
#[cfg(test)]
mod identifiers_test;
#[cfg(test)]
mod model_test;
