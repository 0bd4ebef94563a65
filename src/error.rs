//! Error types for FDP metadata operations.
//!
//! This module provides the [`FdpError`] type for every validation, mapping,
//! and serialization failure, and the [`Result`] convenience type.

use thiserror::Error;

use crate::section::SectionKind;

/// Error type for all FDP metadata operations.
///
/// Validation errors carry enough context (section header, field name,
/// resource id) for a caller to locate the faulty input line. All errors are
/// terminal for the operation that produced them.
#[derive(Error, Debug)]
pub enum FdpError {
    /// No section declares a mandatory kind.
    #[error("Section '{0}' is not found.")]
    MissingSection(SectionKind),

    /// A required field (or both halves of an alternative pair) is absent.
    #[error("Field '{field}' is not found in section '{section}'.")]
    MissingField {
        /// The required field, written `a|b` for an alternative pair.
        field: String,
        /// Header of the section that must declare it.
        section: String,
    },

    /// The same resource id is declared more than once anywhere in the hierarchy.
    #[error("Resource ID '{0}' is not unique.")]
    DuplicateResourceId(String),

    /// A parent's id-list field and the child section headers disagree.
    #[error(
        "{child}_id(s) in the '{parent}' section are not referenced in the '{child}/<{child}_id>' section header(s) or vice versa."
    )]
    DanglingReference {
        /// Kind of the referencing section.
        parent: SectionKind,
        /// Kind of the referenced sections.
        child: SectionKind,
    },

    /// The same section header appears twice in one document.
    #[error("Section '{0}' is declared more than once.")]
    DuplicateSection(String),

    /// A section header does not name a known kind or breaks the id rules.
    #[error("Invalid section header '{header}': {reason}")]
    InvalidSectionHeader {
        /// The raw header text.
        header: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A schema table violates its own preconditions.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// A date-typed value does not match `YYYY-MM-DD` or is not a calendar date.
    #[error("Invalid date format for field '{field}': '{value}' (expected YYYY-MM-DD)")]
    InvalidDateFormat {
        /// Field carrying the value.
        field: String,
        /// The offending literal value.
        value: String,
    },

    /// A field has no predicate mapping (only raised in strict mode).
    #[error("Field '{0}' has no predicate mapping.")]
    UnknownField(String),

    /// A base URI or reference value is not a usable IRI.
    #[error("Invalid URI '{value}': {reason}")]
    InvalidUri {
        /// The offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Error while reading the section-based text format.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Error produced by the RDF serializer.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`FdpError`].
pub type Result<T> = std::result::Result<T, FdpError>;
