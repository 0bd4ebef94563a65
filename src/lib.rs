#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # fdpmeta: FAIR Data Point metadata
//!
//! Validates section-based metadata configurations describing a four-level
//! hierarchy (repository → catalog → dataset → distribution) and maps them to
//! DCAT / Dublin Core RDF graphs, one graph context per resource.
//!
//! ## Quick Start
//!
//! ```
//! use fdpmeta::{loader, ConfigValidator, GraphConfig, GraphMapper, RdfFormat};
//!
//! # fn main() -> Result<(), fdpmeta::FdpError> {
//! let text = "\
//! [fdp]
//! title = Demo FDP
//! publisher = http://example.org/publisher
//! version = 1.0
//! issued = 2016-01-01
//! modified = 2016-01-01
//! fdp_id = fdp
//! catalog_id = cat1
//!
//! [catalog/cat1]
//! title = Demo catalog
//! publisher = http://example.org/publisher
//! version = 1.0
//! issued = 2016-01-01
//! modified = 2016-01-01
//! dataset_id = ds1
//! theme_taxonomy = http://dbpedia.org/resource/Biology
//!
//! [dataset/ds1]
//! title = Demo dataset
//! publisher = http://example.org/publisher
//! version = 1.0
//! issued = 2016-01-01
//! modified = 2016-01-01
//! distribution_id = dist1
//! theme = http://dbpedia.org/resource/Genome
//!
//! [distribution/dist1]
//! title = Demo distribution
//! publisher = http://example.org/publisher
//! version = 1.0
//! issued = 2016-01-01
//! modified = 2016-01-01
//! download_url = http://example.org/data.ttl
//! media_type = text/turtle
//! license = http://creativecommons.org/licenses/by/4.0/
//! ";
//!
//! let validated = ConfigValidator::default().validate(loader::parse_str(text)?)?;
//!
//! let mut mapper = GraphMapper::new(GraphConfig::new("example.org"))?;
//! mapper.ingest_all(&validated)?;
//!
//! let turtle = mapper.serialize(&mapper.dataset_uri("ds1"), RdfFormat::Turtle)?;
//! assert!(turtle.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`section`]: Document model (`MetadataDocument`, `Section`, `SectionId`)
//! - [`schema`]: Required-field schema with alternative pairs
//! - [`validation`]: Schema and cross-reference validation
//! - [`loader`]: Reader for the INI-style section format
//! - [`graph`]: Field-to-predicate mapping and RDF serialization
//! - [`error`]: Error types and result type

pub mod error;
pub mod graph;
pub mod loader;
pub mod schema;
pub mod section;
pub mod validation;

pub use error::{FdpError, Result};
pub use graph::{GraphConfig, GraphMapper, PredicateMap, RdfFormat, RdfGraph};
pub use schema::{MetadataSchema, SchemaEntry};
pub use section::{FieldValue, MetadataDocument, Section, SectionId, SectionKind};
pub use validation::{ConfigValidator, MetadataTriple, ValidatedMetadata};
