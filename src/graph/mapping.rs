//! Field-to-predicate mapping table and value coercion.
//!
//! Every metadata field maps to one or more `(predicate, datatype)` pairs;
//! `title`, for instance, projects onto both `dct:title` and `rdfs:label`.
//! The datatype decides how a raw value becomes an RDF object:
//!
//! - [`Datatype::Date`] values must be `YYYY-MM-DD` calendar dates and become
//!   `xsd:date` literals;
//! - [`Datatype::Uri`] values become URI references; values of `*_id` fields
//!   are rewritten to the relative child path `../{kind}/{id}`;
//! - [`Datatype::String`] values become `xsd:string` literals.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::{FdpError, Result};
use crate::section::ID_SUFFIX;

use super::namespaces::{datatypes, iri, DCAT, DCT, RDFS};
use super::rdf::RdfNode;

/// Value encoding of a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    /// `xsd:string` literal.
    String,
    /// `xsd:date` literal, validated as `YYYY-MM-DD`.
    Date,
    /// URI reference (`xsd:anyURI`).
    Uri,
}

impl Datatype {
    /// Local name of the corresponding XSD datatype.
    #[must_use]
    pub const fn xsd_name(self) -> &'static str {
        match self {
            Self::String => datatypes::STRING,
            Self::Date => datatypes::DATE,
            Self::Uri => datatypes::ANY_URI,
        }
    }

    /// Converts a raw field value into an RDF object.
    ///
    /// # Errors
    ///
    /// Returns [`FdpError::InvalidDateFormat`] when a date value is not a
    /// valid `YYYY-MM-DD` date.
    pub fn coerce(self, field: &str, value: &str) -> Result<RdfNode> {
        match self {
            Self::Date => {
                validate_date(value).ok_or_else(|| FdpError::InvalidDateFormat {
                    field: field.to_string(),
                    value: value.to_string(),
                })?;
                Ok(RdfNode::xsd_literal(value, self.xsd_name()))
            },
            Self::Uri => match field.strip_suffix(ID_SUFFIX) {
                Some(child) => Ok(RdfNode::uri(format!("../{child}/{value}"))),
                None => Ok(RdfNode::uri(value)),
            },
            Self::String => Ok(RdfNode::xsd_literal(value, self.xsd_name())),
        }
    }
}

/// Parses an exact `YYYY-MM-DD` calendar date.
///
/// Rejects unpadded or signed components that a plain format parse would
/// accept, as well as impossible dates such as `2020-02-30`.
#[must_use]
pub fn validate_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// One projection of a field onto a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateMapping {
    /// Full predicate IRI.
    pub predicate: String,
    /// How the value is encoded.
    pub datatype: Datatype,
}

impl PredicateMapping {
    /// Creates a mapping from a predicate IRI.
    #[must_use]
    pub fn new(predicate: impl Into<String>, datatype: Datatype) -> Self {
        Self {
            predicate: predicate.into(),
            datatype,
        }
    }
}

/// Fixed table from field name to predicate projections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateMap {
    fields: IndexMap<String, Vec<PredicateMapping>>,
}

impl PredicateMap {
    /// Builds a table from `(field, mappings)` pairs.
    pub fn new<I, F>(table: I) -> Self
    where
        I: IntoIterator<Item = (F, Vec<PredicateMapping>)>,
        F: Into<String>,
    {
        Self {
            fields: table
                .into_iter()
                .map(|(field, mappings)| (field.into(), mappings))
                .collect(),
        }
    }

    /// The FAIR Data Point table (DCAT and Dublin Core terms).
    #[must_use]
    pub fn fdp() -> Self {
        use Datatype::{Date, String as Text, Uri};

        let one = |ns: &str, local: &str, dt: Datatype| {
            vec![PredicateMapping::new(iri(ns, local), dt)]
        };

        Self::new([
            ("fdp_id", one(DCT, "identifier", Text)),
            ("catalog_id", one(DCT, "hasPart", Uri)),
            ("dataset_id", one(DCAT, "dataset", Uri)),
            ("distribution_id", one(DCAT, "distribution", Uri)),
            (
                "title",
                vec![
                    PredicateMapping::new(iri(DCT, "title"), Text),
                    PredicateMapping::new(iri(RDFS, "label"), Text),
                ],
            ),
            ("description", one(DCT, "description", Text)),
            ("publisher", one(DCT, "publisher", Uri)),
            ("issued", one(DCT, "issued", Date)),
            ("modified", one(DCT, "modified", Date)),
            ("version", one(DCT, "version", Text)),
            ("license", one(DCT, "license", Uri)),
            ("theme", one(DCAT, "theme", Uri)),
            ("theme_taxonomy", one(DCAT, "themeTaxonomy", Uri)),
            ("landing_page", one(DCAT, "landingPage", Uri)),
            ("keyword", one(DCAT, "keyword", Text)),
            ("access_url", one(DCAT, "accessURL", Uri)),
            ("download_url", one(DCAT, "downloadURL", Uri)),
            ("media_type", one(DCAT, "mediaType", Text)),
        ])
    }

    /// Projections for a field, or `None` if the field is unmapped.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[PredicateMapping]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Iterates over mapped field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Whether `predicate` is the projection of an `*_id` field, i.e. its
    /// objects are relative child references.
    #[must_use]
    pub fn is_child_reference(&self, predicate: &str) -> bool {
        self.fields
            .iter()
            .filter(|(field, _)| field.ends_with(ID_SUFFIX))
            .flat_map(|(_, mappings)| mappings)
            .any(|m| m.datatype == Datatype::Uri && m.predicate == predicate)
    }
}

impl Default for PredicateMap {
    fn default() -> Self {
        Self::fdp()
    }
}
