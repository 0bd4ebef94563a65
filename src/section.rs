//! Section-based metadata document model.
//!
//! A metadata document is an ordered collection of [`Section`]s. Every section
//! is identified by a [`SectionId`], the structured form of a header such as
//! `fdp`, `catalog/cat1` or `distribution/d1`, and owns an ordered map from
//! field name to [`FieldValue`].
//!
//! # Examples
//!
//! ```
//! use fdpmeta::section::{MetadataDocument, Section, SectionId, SectionKind};
//!
//! let mut doc = MetadataDocument::new();
//! let catalog = Section::new(SectionId::parse("catalog/cat1").unwrap())
//!     .with_field("title", "Demo")
//!     .with_field("dataset_id", vec!["ds1", "ds2"]);
//! doc.add_section(catalog).unwrap();
//!
//! let section = doc.section(&SectionId::child(SectionKind::Catalog, "cat1")).unwrap();
//! assert_eq!(section.get("dataset_id").unwrap().values().count(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FdpError, Result};

/// Suffix shared by every resource-id field name.
pub const ID_SUFFIX: &str = "_id";

/// The four levels of the metadata hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    /// The singleton FAIR Data Point (repository) section, header `fdp`.
    Repository,
    /// A catalog section, header `catalog/<id>`.
    Catalog,
    /// A dataset section, header `dataset/<id>`.
    Dataset,
    /// A distribution section, header `distribution/<id>`.
    Distribution,
}

impl SectionKind {
    /// All kinds, root first.
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Repository,
        SectionKind::Catalog,
        SectionKind::Dataset,
        SectionKind::Distribution,
    ];

    /// Name used in section headers and URI paths.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Repository => "fdp",
            Self::Catalog => "catalog",
            Self::Dataset => "dataset",
            Self::Distribution => "distribution",
        }
    }

    /// The kind one level below, if any.
    #[must_use]
    pub const fn child(self) -> Option<SectionKind> {
        match self {
            Self::Repository => Some(Self::Catalog),
            Self::Catalog => Some(Self::Dataset),
            Self::Dataset => Some(Self::Distribution),
            Self::Distribution => None,
        }
    }

    /// Whether sections of this kind carry an id in their header.
    #[must_use]
    pub const fn has_header_id(self) -> bool {
        !matches!(self, Self::Repository)
    }

    /// Name of the field holding ids of this kind (`fdp_id`, `catalog_id`, ...).
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::Repository => "fdp_id",
            Self::Catalog => "catalog_id",
            Self::Dataset => "dataset_id",
            Self::Distribution => "distribution_id",
        }
    }

    /// Name of this kind's id-list field referencing its children, if any.
    #[must_use]
    pub fn child_list_field(self) -> Option<&'static str> {
        self.child().map(SectionKind::id_field)
    }

    /// Resolves the kind an `*_id` field refers to (`dataset_id` -> dataset).
    #[must_use]
    pub fn from_id_field(field: &str) -> Option<SectionKind> {
        Self::ALL.into_iter().find(|kind| kind.id_field() == field)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = FdpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fdp" | "repository" => Ok(Self::Repository),
            "catalog" => Ok(Self::Catalog),
            "dataset" => Ok(Self::Dataset),
            "distribution" => Ok(Self::Distribution),
            other => Err(FdpError::InvalidSectionHeader {
                header: other.to_string(),
                reason: "unknown section kind".into(),
            }),
        }
    }
}

/// Structured section header: a kind plus the resource id for child kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId {
    kind: SectionKind,
    id: Option<String>,
}

impl SectionId {
    /// The singleton repository section.
    #[must_use]
    pub const fn repository() -> Self {
        Self {
            kind: SectionKind::Repository,
            id: None,
        }
    }

    /// A child section header. The caller guarantees `kind` is not the repository.
    #[must_use]
    pub fn child(kind: SectionKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
        }
    }

    /// Parses a header such as `fdp` or `dataset/ds1`.
    ///
    /// # Errors
    ///
    /// Returns [`FdpError::InvalidSectionHeader`] when the kind is unknown, the
    /// repository header carries an id, or a child header lacks one.
    pub fn parse(header: &str) -> Result<Self> {
        let header = header.trim();
        let invalid = |reason: &str| FdpError::InvalidSectionHeader {
            header: header.to_string(),
            reason: reason.to_string(),
        };

        let (kind_name, id) = match header.split_once('/') {
            Some((kind, id)) => (kind.trim(), Some(id.trim())),
            None => (header, None),
        };
        let kind = kind_name
            .parse::<SectionKind>()
            .map_err(|_| invalid("unknown section kind"))?;

        match (kind.has_header_id(), id) {
            (false, None) => Ok(Self::repository()),
            (false, Some(_)) => Err(invalid("the fdp section does not take an id")),
            (true, Some(id)) if !id.is_empty() && !id.contains('/') => Ok(Self::child(kind, id)),
            (true, Some(_)) => Err(invalid("resource id must be a single non-empty segment")),
            (true, None) => Err(invalid("section requires a resource id")),
        }
    }

    /// The section kind.
    #[must_use]
    pub const fn kind(&self) -> SectionKind {
        self.kind
    }

    /// The resource id from the header; `None` for the repository.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}/{id}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for SectionId {
    type Err = FdpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A field value: one string, or an ordered list for multi-line values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A scalar value.
    Single(String),
    /// A multi-valued field, in declaration order.
    Multi(Vec<String>),
}

impl FieldValue {
    /// Builds a value from raw text; text with line breaks becomes multi-valued.
    ///
    /// Lines are trimmed and empty lines dropped.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw.contains('\n') {
            Self::Multi(
                raw.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect(),
            )
        } else {
            Self::Single(raw.trim().to_string())
        }
    }

    /// Iterates over the individual values.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        };
        slice.iter().map(String::as_str)
    }

    /// Returns true for a multi-valued field.
    #[must_use]
    pub const fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multi(values.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

/// A section: header plus fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: SectionId,
    fields: IndexMap<String, FieldValue>,
}

impl Section {
    /// Creates an empty section.
    #[must_use]
    pub fn new(id: SectionId) -> Self {
        Self {
            id,
            fields: IndexMap::new(),
        }
    }

    /// Adds a field, builder style. A repeated name replaces the earlier value
    /// but keeps its position.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// The section header.
    #[must_use]
    pub const fn id(&self) -> &SectionId {
        &self.id
    }

    /// Looks up a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Returns true if the field is declared.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Raw serde shape of a document: header -> field -> value.
pub(crate) type RawDocument = IndexMap<String, IndexMap<String, FieldValue>>;

/// An ordered collection of sections with unique headers.
///
/// Serializes to (and deserializes from) a JSON object keyed by header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument", into = "RawDocument")]
pub struct MetadataDocument {
    sections: IndexMap<SectionId, Section>,
}

impl MetadataDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section.
    ///
    /// # Errors
    ///
    /// Returns [`FdpError::DuplicateSection`] if the header is already present.
    pub fn add_section(&mut self, section: Section) -> Result<()> {
        if self.sections.contains_key(section.id()) {
            return Err(FdpError::DuplicateSection(section.id().to_string()));
        }
        self.sections.insert(section.id().clone(), section);
        Ok(())
    }

    /// Looks up a section by header.
    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.get(id)
    }

    /// Iterates over sections in declaration order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// Iterates over the sections of one kind.
    pub fn sections_of(&self, kind: SectionKind) -> impl Iterator<Item = &Section> {
        self.sections().filter(move |s| s.id().kind() == kind)
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl TryFrom<RawDocument> for MetadataDocument {
    type Error = FdpError;

    fn try_from(raw: RawDocument) -> Result<Self> {
        let mut doc = Self::new();
        for (header, fields) in raw {
            let mut section = Section::new(SectionId::parse(&header)?);
            for (name, value) in fields {
                section.insert(name, value);
            }
            doc.add_section(section)?;
        }
        Ok(doc)
    }
}

impl From<MetadataDocument> for RawDocument {
    fn from(doc: MetadataDocument) -> Self {
        doc.sections
            .into_iter()
            .map(|(id, section)| (id.to_string(), section.fields))
            .collect()
    }
}
