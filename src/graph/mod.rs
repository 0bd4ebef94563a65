//! Mapping of validated metadata to per-resource RDF graphs.
//!
//! Each field of a validated document is looked up in a [`PredicateMap`],
//! coerced according to its [`Datatype`], and added to the graph context of
//! the resource its section describes. Contexts serialize to JSON-LD,
//! Turtle, N-Triples or RDF/XML.
//!
//! # Quick Start
//!
//! ```
//! use fdpmeta::graph::{GraphConfig, GraphMapper, RdfFormat};
//! use fdpmeta::section::{SectionId, SectionKind};
//!
//! let mut mapper = GraphMapper::new(GraphConfig::new("example.org"))?;
//! let catalog = SectionId::child(SectionKind::Catalog, "cat1");
//! mapper.ingest(&catalog, "title", "Demo")?;
//!
//! let turtle = mapper.serialize(&mapper.catalog_uri("cat1"), RdfFormat::Turtle)?;
//! assert!(turtle.is_some());
//! # Ok::<(), fdpmeta::FdpError>(())
//! ```
//!
//! # Modules
//!
//! - `config`: mapping and output options
//! - `mapping`: field-to-predicate table and value coercion
//! - `mapper`: per-resource context accumulation
//! - `namespaces`: vocabulary namespaces and terms
//! - `rdf`: statement model and serialization

mod config;
mod mapper;
mod mapping;
pub mod namespaces;
mod rdf;

pub use config::{GraphConfig, RdfFormat};
pub use mapper::GraphMapper;
pub use mapping::{validate_date, Datatype, PredicateMap, PredicateMapping};
pub use rdf::{RdfGraph, RdfNode, RdfTriple};
