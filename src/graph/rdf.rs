//! RDF statement model and serialization.
//!
//! This module wraps the oxrdf/oxrdfio libraries behind a small statement
//! model tailored for per-resource metadata contexts. A [`RdfGraph`] is a set:
//! adding a statement twice leaves it unchanged. Statements keep insertion
//! order so serialized output is deterministic.

use std::io::Read;

use indexmap::IndexSet;
use oxrdf::{Literal, NamedNode, NamedOrBlankNode, Quad, Term, Triple};
use oxrdfio::{JsonLdProfileSet, RdfFormat as OxRdfFormat, RdfParser, RdfSerializer};
use url::Url;

use crate::error::{FdpError, Result};

use super::config::RdfFormat;
use super::namespaces;

/// A single RDF statement (subject, predicate, object).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfTriple {
    /// The subject of the statement.
    pub subject: RdfNode,
    /// The predicate IRI.
    pub predicate: String,
    /// The object of the statement.
    pub object: RdfNode,
}

impl RdfTriple {
    /// Creates a new statement.
    #[must_use]
    pub fn new(subject: RdfNode, predicate: impl Into<String>, object: RdfNode) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

/// An RDF node (subject or object of a statement).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfNode {
    /// A URI reference. May be relative (`../dataset/ds1`); relative references
    /// are resolved against the statement's subject when serialized.
    Uri(String),
    /// A typed literal.
    Literal {
        /// The lexical value.
        value: String,
        /// Datatype IRI.
        datatype: String,
    },
}

impl RdfNode {
    /// Creates a new URI node.
    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri(uri.into())
    }

    /// Creates a new typed literal.
    #[must_use]
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: datatype.into(),
        }
    }

    /// Creates an `xsd:` typed literal from the datatype's local name.
    #[must_use]
    pub fn xsd_literal(value: impl Into<String>, xsd_type: &str) -> Self {
        Self::typed_literal(value, namespaces::iri(namespaces::XSD, xsd_type))
    }

    /// Returns true if this is a URI node.
    #[must_use]
    pub const fn is_uri(&self) -> bool {
        matches!(self, Self::Uri(_))
    }

    /// Returns true if this is a literal.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    /// The URI or the literal's lexical value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Uri(uri) => uri,
            Self::Literal { value, .. } => value,
        }
    }
}

/// A set of RDF statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RdfGraph {
    triples: IndexSet<RdfTriple>,
}

impl RdfGraph {
    /// Creates a new empty RDF graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a statement. Returns false if it was already present.
    pub fn add_triple(&mut self, triple: RdfTriple) -> bool {
        self.triples.insert(triple)
    }

    /// Adds a statement from components. Returns false if it was already present.
    pub fn add(&mut self, subject: RdfNode, predicate: impl Into<String>, object: RdfNode) -> bool {
        self.add_triple(RdfTriple::new(subject, predicate, object))
    }

    /// Returns true if the statement is present.
    #[must_use]
    pub fn contains(&self, triple: &RdfTriple) -> bool {
        self.triples.contains(triple)
    }

    /// Returns the number of statements in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Returns an iterator over the statements in insertion order.
    pub fn triples(&self) -> impl Iterator<Item = &RdfTriple> {
        self.triples.iter()
    }

    /// Objects of all statements with the given predicate.
    pub fn objects<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = &'a RdfNode> {
        self.triples
            .iter()
            .filter(move |t| t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Serializes the graph to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if a node is not a valid IRI or serialization fails.
    pub fn serialize(&self, format: RdfFormat) -> Result<String> {
        let mut serializer = RdfSerializer::from_format(to_oxrdf_format(format));
        for (prefix, namespace) in namespaces::PREFIXES {
            serializer = serializer
                .with_prefix(prefix, namespace)
                .map_err(|e| FdpError::Serialization(e.to_string()))?;
        }
        let mut serializer = serializer.for_writer(Vec::new());

        for triple in &self.triples {
            let ox_triple = to_oxrdf_triple(triple)?;
            serializer
                .serialize_triple(&ox_triple)
                .map_err(|e| FdpError::Serialization(e.to_string()))?;
        }

        let output = serializer
            .finish()
            .map_err(|e| FdpError::Serialization(e.to_string()))?;
        String::from_utf8(output).map_err(|e| FdpError::Serialization(e.to_string()))
    }

    /// Parses an RDF graph from a reader in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the input uses blank nodes.
    pub fn parse_from_reader<R: Read>(reader: R, format: RdfFormat) -> Result<Self> {
        let parser = RdfParser::from_format(to_oxrdf_format(format)).for_reader(reader);

        let mut graph = Self::new();
        for result in parser {
            let quad = result.map_err(|e| FdpError::Serialization(e.to_string()))?;
            graph.add_triple(from_oxrdf_quad(&quad)?);
        }
        Ok(graph)
    }

    /// Parses an RDF graph from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn parse(input: &str, format: RdfFormat) -> Result<Self> {
        Self::parse_from_reader(input.as_bytes(), format)
    }
}

/// Converts our [`RdfFormat`] to oxrdfio's format.
fn to_oxrdf_format(format: RdfFormat) -> OxRdfFormat {
    match format {
        RdfFormat::JsonLd => OxRdfFormat::JsonLd {
            profile: JsonLdProfileSet::default(),
        },
        RdfFormat::Turtle => OxRdfFormat::Turtle,
        RdfFormat::NTriples => OxRdfFormat::NTriples,
        RdfFormat::RdfXml => OxRdfFormat::RdfXml,
    }
}

/// Resolves a possibly relative reference against a base IRI.
///
/// # Errors
///
/// Returns [`FdpError::InvalidUri`] if the result is not a valid URL.
pub(super) fn resolve_reference(base: &str, reference: &str) -> Result<String> {
    let invalid = |reason: String| FdpError::InvalidUri {
        value: reference.to_string(),
        reason,
    };
    match Url::parse(reference) {
        Ok(_) => Ok(reference.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base)
            .and_then(|base| base.join(reference))
            .map(String::from)
            .map_err(|e| invalid(e.to_string())),
        Err(e) => Err(invalid(e.to_string())),
    }
}

fn named_node(iri: String) -> Result<NamedNode> {
    NamedNode::new(iri.as_str()).map_err(|e| FdpError::InvalidUri {
        value: iri.clone(),
        reason: e.to_string(),
    })
}

/// Converts an [`RdfTriple`] to an oxrdf Triple, resolving relative objects
/// against the subject.
fn to_oxrdf_triple(triple: &RdfTriple) -> Result<Triple> {
    let RdfNode::Uri(subject) = &triple.subject else {
        return Err(FdpError::Serialization(
            "Literals cannot be statement subjects".into(),
        ));
    };
    let subject_node = named_node(subject.clone())?;
    let predicate = named_node(triple.predicate.clone())?;

    let object = match &triple.object {
        RdfNode::Uri(uri) => Term::NamedNode(named_node(resolve_reference(subject, uri)?)?),
        RdfNode::Literal { value, datatype } => {
            Term::Literal(Literal::new_typed_literal(value, named_node(datatype.clone())?))
        },
    };

    Ok(Triple::new(subject_node, predicate, object))
}

/// Converts an oxrdf Quad back to our [`RdfTriple`].
fn from_oxrdf_quad(quad: &Quad) -> Result<RdfTriple> {
    let subject = match &quad.subject {
        NamedOrBlankNode::NamedNode(n) => RdfNode::Uri(n.as_str().to_string()),
        #[allow(unreachable_patterns)]
        _ => {
            return Err(FdpError::Serialization(
                "Unsupported subject type".into(),
            ));
        },
    };

    let predicate = quad.predicate.as_str().to_string();

    let object = match &quad.object {
        Term::NamedNode(n) => RdfNode::Uri(n.as_str().to_string()),
        Term::Literal(lit) if lit.language().is_some() => {
            return Err(FdpError::Serialization(format!(
                "language-tagged literal {lit} is not supported"
            )));
        },
        Term::Literal(lit) => {
            RdfNode::typed_literal(lit.value(), lit.datatype().as_str())
        },
        #[allow(unreachable_patterns)]
        _ => {
            return Err(FdpError::Serialization("Unsupported object type".into()));
        },
    };

    Ok(RdfTriple::new(subject, predicate, object))
}
