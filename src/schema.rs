//! Required-field schema for metadata sections.
//!
//! A [`MetadataSchema`] lists, per [`SectionKind`], the fields every section of
//! that kind must declare. An entry is either a plain field name or an
//! alternative pair written `a|b`, satisfied when either side is present.
//!
//! The default table is [`MetadataSchema::fdp`]. Custom tables go through
//! [`MetadataSchema::new`], which rejects alternative pairs involving
//! resource id-list fields: references are resolved per field, so an id-list
//! field must always be present on its own.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{FdpError, Result};
use crate::section::{Section, SectionKind};

/// Fields shared by every section kind.
pub const CORE_FIELDS: [&str; 5] = ["title", "publisher", "version", "issued", "modified"];

/// One required-field entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaEntry {
    /// The field must be present.
    Field(String),
    /// At least one of the two fields must be present.
    Alternative(String, String),
}

impl SchemaEntry {
    /// Returns true if `section` satisfies this entry.
    #[must_use]
    pub fn is_satisfied_by(&self, section: &Section) -> bool {
        match self {
            Self::Field(name) => section.contains(name),
            Self::Alternative(a, b) => section.contains(a) || section.contains(b),
        }
    }

    /// The plain field name, if this is not an alternative pair.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name),
            Self::Alternative(..) => None,
        }
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        let (first, second) = match self {
            Self::Field(name) => (name.as_str(), None),
            Self::Alternative(a, b) => (a.as_str(), Some(b.as_str())),
        };
        std::iter::once(first).chain(second)
    }
}

impl fmt::Display for SchemaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Alternative(a, b) => write!(f, "{a}|{b}"),
        }
    }
}

impl FromStr for SchemaEntry {
    type Err = FdpError;

    fn from_str(s: &str) -> Result<Self> {
        let entry = match s.split_once('|') {
            Some((a, b)) => Self::Alternative(a.trim().to_string(), b.trim().to_string()),
            None => Self::Field(s.trim().to_string()),
        };
        if entry.names().any(|name| name.is_empty() || name.contains('|')) {
            return Err(FdpError::InvalidSchema(format!(
                "malformed schema entry '{s}'"
            )));
        }
        Ok(entry)
    }
}

/// Required fields per section kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSchema {
    required: IndexMap<SectionKind, Vec<SchemaEntry>>,
}

impl MetadataSchema {
    /// Builds a schema from `(kind, entries)` pairs, entries written as `name`
    /// or `a|b`.
    ///
    /// Kinds that are not listed require no fields.
    ///
    /// # Errors
    ///
    /// Returns [`FdpError::InvalidSchema`] for a malformed entry or an
    /// alternative pair naming a resource id field.
    pub fn new<'a, I, E>(table: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SectionKind, E)>,
        E: IntoIterator<Item = &'a str>,
    {
        let mut required = IndexMap::new();
        for (kind, entries) in table {
            let entries = entries
                .into_iter()
                .map(str::parse::<SchemaEntry>)
                .collect::<Result<Vec<SchemaEntry>>>()?;
            required.insert(kind, entries);
        }
        let schema = Self { required };
        schema.check_alternatives()?;
        Ok(schema)
    }

    /// The FAIR Data Point schema.
    #[must_use]
    pub fn fdp() -> Self {
        let with_core = |extra: &[&str]| -> Vec<SchemaEntry> {
            CORE_FIELDS
                .iter()
                .chain(extra)
                .map(|name| match name.split_once('|') {
                    Some((a, b)) => SchemaEntry::Alternative(a.into(), b.into()),
                    None => SchemaEntry::Field((*name).into()),
                })
                .collect()
        };

        let mut required = IndexMap::new();
        required.insert(
            SectionKind::Repository,
            with_core(&["fdp_id", "catalog_id"]),
        );
        required.insert(
            SectionKind::Catalog,
            with_core(&["dataset_id", "theme_taxonomy"]),
        );
        required.insert(
            SectionKind::Dataset,
            with_core(&["distribution_id", "theme"]),
        );
        required.insert(
            SectionKind::Distribution,
            with_core(&["access_url|download_url", "media_type", "license"]),
        );
        Self { required }
    }

    /// Required entries for a kind, in declaration order.
    #[must_use]
    pub fn required(&self, kind: SectionKind) -> &[SchemaEntry] {
        self.required.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    fn check_alternatives(&self) -> Result<()> {
        for entry in self.required.values().flatten() {
            if let SchemaEntry::Alternative(..) = entry {
                if let Some(id_field) = entry
                    .names()
                    .find(|name| SectionKind::from_id_field(name).is_some())
                {
                    return Err(FdpError::InvalidSchema(format!(
                        "resource id field '{id_field}' cannot be part of alternative '{entry}'"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for MetadataSchema {
    fn default() -> Self {
        Self::fdp()
    }
}
