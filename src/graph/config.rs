//! Configuration options for graph mapping.
//!
//! This module provides the [`GraphConfig`] struct which controls how validated
//! metadata is mapped to RDF and how the resulting graphs are serialized.

use std::fmt;
use std::str::FromStr;

use crate::error::FdpError;

/// Output format for RDF serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RdfFormat {
    /// JSON-LD format (application/ld+json)
    #[default]
    JsonLd,
    /// Turtle format (text/turtle)
    Turtle,
    /// N-Triples format (application/n-triples)
    NTriples,
    /// RDF/XML format (application/rdf+xml)
    RdfXml,
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonLd => write!(f, "JSON-LD"),
            Self::Turtle => write!(f, "Turtle"),
            Self::NTriples => write!(f, "N-Triples"),
            Self::RdfXml => write!(f, "RDF/XML"),
        }
    }
}

impl RdfFormat {
    /// All supported formats.
    pub const ALL: [RdfFormat; 4] = [Self::JsonLd, Self::Turtle, Self::NTriples, Self::RdfXml];

    /// Returns the MIME type for this RDF format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::JsonLd => "application/ld+json",
            Self::Turtle => "text/turtle",
            Self::NTriples => "application/n-triples",
            Self::RdfXml => "application/rdf+xml",
        }
    }

    /// Returns the typical file extension for this RDF format.
    #[must_use]
    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::JsonLd => "jsonld",
            Self::Turtle => "ttl",
            Self::NTriples => "nt",
            Self::RdfXml => "rdf",
        }
    }
}

impl FromStr for RdfFormat {
    type Err = FdpError;

    /// Accepts a format name, file extension or MIME type, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| {
                wanted == format.to_string().to_ascii_lowercase()
                    || wanted == format.file_extension()
                    || wanted == format.mime_type()
            })
            .or(match wanted.as_str() {
                "json-ld" | "jsonld" | "json" => Some(Self::JsonLd),
                "ntriples" => Some(Self::NTriples),
                "xml" | "rdfxml" => Some(Self::RdfXml),
                _ => None,
            })
            .ok_or_else(|| FdpError::Serialization(format!("unsupported RDF format '{s}'")))
    }
}

/// Configuration for mapping validated metadata to RDF graphs.
///
/// # Examples
///
/// ```
/// use fdpmeta::graph::{GraphConfig, RdfFormat};
///
/// let config = GraphConfig::new("example.org")
///     .with_language("nl")
///     .with_output_format(RdfFormat::Turtle)
///     .with_strict_fields(true);
/// assert_eq!(config.language, "nl");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Base URI for resource contexts, e.g. `http://example.org`.
    ///
    /// A base without a scheme gets `http://`; trailing slashes are dropped.
    pub base_uri: String,

    /// ISO 639-1 code for the `dct:language` statement of every context.
    pub language: String,

    /// Reject fields without a predicate mapping.
    ///
    /// When false (default), unmapped fields are skipped.
    pub strict_fields: bool,

    /// Default output format for serialization.
    pub output_format: RdfFormat,
}

impl GraphConfig {
    /// Creates a configuration for the given base URI with default options.
    #[must_use]
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            language: "en".to_string(),
            strict_fields: false,
            output_format: RdfFormat::default(),
        }
    }

    /// Sets the language code.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_output_format(mut self, format: RdfFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enables rejection of unmapped fields.
    #[must_use]
    pub const fn with_strict_fields(mut self, enabled: bool) -> Self {
        self.strict_fields = enabled;
        self
    }
}
