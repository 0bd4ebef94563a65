//! Per-resource graph accumulation.
//!
//! [`GraphMapper`] consumes the `(section, field, value)` stream of a
//! validated document and accumulates one [`RdfGraph`] context per resource.
//! Contexts are keyed by a URI derived from the base URI:
//!
//! | resource | context URI |
//! |---|---|
//! | repository | `{base}/fdp` |
//! | catalog `id` | `{base}/catalog/{id}` |
//! | dataset `id` | `{base}/dataset/{id}` |
//! | distribution `id` | `{base}/distribution/{id}` |
//!
//! A context is created the first time a field of its section is ingested,
//! together with its bootstrap statements (type, language, identifier, and a
//! `rdfs:seeAlso` documentation link for the repository).

use indexmap::IndexMap;
use tracing::{debug, trace};
use url::Url;

use crate::error::{FdpError, Result};
use crate::section::{SectionId, SectionKind};
use crate::validation::{MetadataTriple, ValidatedMetadata};

use super::config::{GraphConfig, RdfFormat};
use super::mapping::PredicateMap;
use super::namespaces::{classes, datatypes, iri, DCAT, DCT, LANG, RDF, RDFS};
use super::rdf::{resolve_reference, RdfGraph, RdfNode};

/// Maps validated metadata to per-resource RDF graphs.
#[derive(Debug, Clone)]
pub struct GraphMapper {
    base_uri: String,
    config: GraphConfig,
    predicates: PredicateMap,
    contexts: IndexMap<String, RdfGraph>,
}

impl GraphMapper {
    /// Creates a mapper with the FAIR Data Point predicate table.
    ///
    /// # Errors
    ///
    /// Returns [`FdpError::InvalidUri`] if the configured base URI is unusable.
    pub fn new(config: GraphConfig) -> Result<Self> {
        Self::with_predicates(config, PredicateMap::fdp())
    }

    /// Creates a mapper with a custom predicate table.
    ///
    /// # Errors
    ///
    /// Returns [`FdpError::InvalidUri`] if the configured base URI is unusable.
    pub fn with_predicates(config: GraphConfig, predicates: PredicateMap) -> Result<Self> {
        let base_uri = normalize_base_uri(&config.base_uri)?;
        debug!(%base_uri, "graph mapper created");
        Ok(Self {
            base_uri,
            config,
            predicates,
            contexts: IndexMap::new(),
        })
    }

    /// The normalized base URI.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// The configuration this mapper was built with.
    #[must_use]
    pub const fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Documentation URI linked from the repository: `{base}/doc`.
    #[must_use]
    pub fn doc_uri(&self) -> String {
        format!("{}/doc", self.base_uri)
    }

    /// Repository context URI: `{base}/fdp`.
    #[must_use]
    pub fn repository_uri(&self) -> String {
        format!("{}/{}", self.base_uri, SectionKind::Repository.name())
    }

    /// Catalog context URI: `{base}/catalog/{id}`.
    #[must_use]
    pub fn catalog_uri(&self, id: &str) -> String {
        self.child_uri(SectionKind::Catalog, id)
    }

    /// Dataset context URI: `{base}/dataset/{id}`.
    #[must_use]
    pub fn dataset_uri(&self, id: &str) -> String {
        self.child_uri(SectionKind::Dataset, id)
    }

    /// Distribution context URI: `{base}/distribution/{id}`.
    #[must_use]
    pub fn distribution_uri(&self, id: &str) -> String {
        self.child_uri(SectionKind::Distribution, id)
    }

    /// Context URI for any section.
    #[must_use]
    pub fn resource_uri(&self, section: &SectionId) -> String {
        match section.id() {
            Some(id) => self.child_uri(section.kind(), id),
            None => self.repository_uri(),
        }
    }

    fn child_uri(&self, kind: SectionKind, id: &str) -> String {
        format!("{}/{}/{id}", self.base_uri, kind.name())
    }

    /// Maps one field value into its section's context.
    ///
    /// Returns the number of statements that were new to the context.
    /// Ingesting the same value twice leaves the context unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FdpError::InvalidDateFormat`] for a malformed date, or
    /// [`FdpError::UnknownField`] for an unmapped field in strict mode. On
    /// error nothing is added.
    pub fn ingest(&mut self, section: &SectionId, field: &str, value: &str) -> Result<usize> {
        let objects = match self.predicates.get(field) {
            Some(mappings) => mappings
                .iter()
                .map(|m| Ok((m.predicate.clone(), m.datatype.coerce(field, value)?)))
                .collect::<Result<Vec<_>>>()?,
            None if self.config.strict_fields => {
                return Err(FdpError::UnknownField(field.to_string()));
            },
            None => {
                debug!(%section, field, "skipping unmapped field");
                Vec::new()
            },
        };

        let uri = self.resource_uri(section);
        let subject = RdfNode::uri(uri.as_str());
        let context = self.context_mut(section, uri);

        let mut added = 0;
        for (predicate, object) in objects {
            trace!(%section, %predicate, object = object.value(), "statement");
            if context.add(subject.clone(), predicate, object) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Maps one entry of a validated document.
    ///
    /// # Errors
    ///
    /// See [`GraphMapper::ingest`].
    pub fn ingest_triple(&mut self, triple: MetadataTriple<'_>) -> Result<usize> {
        self.ingest(triple.section, triple.field, triple.value)
    }

    /// Maps every entry of a validated document, stopping at the first error.
    ///
    /// # Errors
    ///
    /// See [`GraphMapper::ingest`].
    pub fn ingest_all(&mut self, metadata: &ValidatedMetadata) -> Result<usize> {
        metadata
            .triples()
            .try_fold(0, |total, triple| -> Result<usize> {
                Ok(total + self.ingest_triple(triple)?)
            })
    }

    /// Returns the context for `uri`, creating and bootstrapping it on first use.
    fn context_mut(&mut self, section: &SectionId, uri: String) -> &mut RdfGraph {
        let language = iri(LANG, &self.config.language);
        let doc_uri = self.doc_uri();
        self.contexts.entry(uri).or_insert_with_key(|uri| {
            debug!(%section, context = %uri, "creating graph context");
            bootstrap(section, uri, language, doc_uri)
        })
    }

    /// The context for a resource URI, if any statement targeted it.
    #[must_use]
    pub fn context(&self, uri: &str) -> Option<&RdfGraph> {
        self.contexts.get(uri)
    }

    /// Iterates over `(uri, context)` pairs in creation order.
    pub fn contexts(&self) -> impl Iterator<Item = (&str, &RdfGraph)> {
        self.contexts.iter().map(|(uri, graph)| (uri.as_str(), graph))
    }

    /// Serializes one resource context.
    ///
    /// Returns `Ok(None)` when the resource has no statements.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement cannot be encoded in `format`.
    pub fn serialize(&self, uri: &str, format: RdfFormat) -> Result<Option<String>> {
        match self.contexts.get(uri) {
            Some(graph) if !graph.is_empty() => self.write_context(uri, graph, format).map(Some),
            _ => Ok(None),
        }
    }

    /// Child references are written one level below the context URI. The
    /// repository sits directly under the base, so its `*_id` references are
    /// resolved against `{base}/fdp/` first. Every other relative object
    /// resolves against its subject.
    fn write_context(&self, uri: &str, graph: &RdfGraph, format: RdfFormat) -> Result<String> {
        if uri != self.repository_uri() {
            return graph.serialize(format);
        }

        let container = format!("{uri}/");
        let mut resolved = RdfGraph::new();
        for triple in graph.triples() {
            let object = match &triple.object {
                RdfNode::Uri(reference) if self.predicates.is_child_reference(&triple.predicate) => {
                    RdfNode::uri(resolve_reference(&container, reference)?)
                },
                object => object.clone(),
            };
            resolved.add(triple.subject.clone(), triple.predicate.as_str(), object);
        }
        resolved.serialize(format)
    }

    /// Serializes one resource context in the configured output format.
    ///
    /// # Errors
    ///
    /// See [`GraphMapper::serialize`].
    pub fn serialize_default(&self, uri: &str) -> Result<Option<String>> {
        self.serialize(uri, self.config.output_format)
    }

    /// Serializes every non-empty context, in creation order.
    ///
    /// # Errors
    ///
    /// See [`GraphMapper::serialize`].
    pub fn serialize_all(&self, format: RdfFormat) -> Result<Vec<(String, String)>> {
        self.contexts
            .iter()
            .filter(|(_, graph)| !graph.is_empty())
            .map(|(uri, graph)| Ok((uri.clone(), self.write_context(uri, graph, format)?)))
            .collect()
    }
}

/// Bootstrap statements for a newly created context.
fn bootstrap(section: &SectionId, uri: &str, language: String, doc_uri: String) -> RdfGraph {
    let mut graph = RdfGraph::new();
    let subject = RdfNode::uri(uri);
    let class = match section.kind() {
        SectionKind::Repository => iri(DCT, classes::AGENT),
        SectionKind::Catalog => iri(DCAT, classes::CATALOG),
        SectionKind::Dataset => iri(DCAT, classes::DATASET),
        SectionKind::Distribution => iri(DCAT, classes::DISTRIBUTION),
    };

    graph.add(subject.clone(), iri(RDF, "type"), RdfNode::uri(class));
    if section.kind() == SectionKind::Repository {
        graph.add(subject.clone(), iri(RDFS, "seeAlso"), RdfNode::uri(doc_uri));
    }
    graph.add(subject.clone(), iri(DCT, "language"), RdfNode::uri(language));
    if let Some(id) = section.id() {
        graph.add(
            subject,
            iri(DCT, "identifier"),
            RdfNode::xsd_literal(id, datatypes::STRING),
        );
    }
    graph
}

/// Normalizes a base URI: adds `http://` when no scheme is given and drops
/// trailing slashes.
fn normalize_base_uri(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let base = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    match Url::parse(&base) {
        Ok(url) if url.has_host() => Ok(base),
        Ok(_) => Err(FdpError::InvalidUri {
            value: raw.to_string(),
            reason: "base URI has no host".into(),
        }),
        Err(e) => Err(FdpError::InvalidUri {
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}
