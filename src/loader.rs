//! Loader for the section-based metadata text format.
//!
//! The format is INI-like:
//!
//! ```text
//! [fdp]
//! title = My FAIR Data Point
//! catalog_id = cat1
//!
//! [catalog/cat1]
//! ; comment
//! dataset_id =
//!     ds1
//!     ds2
//! ```
//!
//! - `[kind]` or `[kind/id]` opens a section;
//! - `key = value` and `key: value` declare fields (keys are lower-cased);
//! - indented lines continue the previous value, and a value spanning several
//!   lines becomes a multi-valued [`FieldValue`];
//! - blank lines and lines starting with `#` or `;` are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{FdpError, Result};
use crate::section::{FieldValue, MetadataDocument, RawDocument, Section, SectionId};

lazy_static! {
    static ref SECTION_RE: Regex = Regex::new(r"^\[(?P<header>[^\]]+)\]\s*$")
        .expect("valid section pattern");
    static ref OPTION_RE: Regex = Regex::new(r"^(?P<key>[^:=\s][^:=]*?)\s*[:=]\s*(?P<value>.*?)\s*$")
        .expect("valid option pattern");
}

/// A section being read: header plus raw (unsplit) values.
struct PendingSection {
    id: SectionId,
    fields: IndexMap<String, String>,
    last_key: Option<String>,
}

impl PendingSection {
    fn finish(self) -> Section {
        self.fields
            .into_iter()
            .fold(Section::new(self.id), |section, (key, raw)| {
                section.with_field(key, FieldValue::from_raw(&raw))
            })
    }
}

/// Parses metadata text into a document.
///
/// # Errors
///
/// Returns [`FdpError::Parse`] for malformed lines or repeated fields,
/// [`FdpError::InvalidSectionHeader`] for bad headers and
/// [`FdpError::DuplicateSection`] for repeated headers.
pub fn parse_str(text: &str) -> Result<MetadataDocument> {
    let mut document = MetadataDocument::new();
    let mut pending: Option<PendingSection> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        // Continuation of the previous value
        if line.starts_with(char::is_whitespace) {
            let continued = pending.as_mut().and_then(|section| {
                let key = section.last_key.as_ref()?;
                section.fields.get_mut(key)
            });
            let Some(value) = continued else {
                return Err(FdpError::Parse {
                    line: line_no,
                    message: "continuation line without a preceding field".into(),
                });
            };
            value.push('\n');
            value.push_str(trimmed);
            continue;
        }

        if let Some(caps) = SECTION_RE.captures(trimmed) {
            if let Some(done) = pending.take() {
                document.add_section(done.finish())?;
            }
            pending = Some(PendingSection {
                id: SectionId::parse(&caps["header"])?,
                fields: IndexMap::new(),
                last_key: None,
            });
            continue;
        }

        let Some(caps) = OPTION_RE.captures(trimmed) else {
            return Err(FdpError::Parse {
                line: line_no,
                message: format!("malformed line '{trimmed}'"),
            });
        };
        let Some(section) = pending.as_mut() else {
            return Err(FdpError::Parse {
                line: line_no,
                message: "field declared before any section header".into(),
            });
        };

        let key = caps["key"].to_lowercase();
        if section.fields.contains_key(&key) {
            return Err(FdpError::Parse {
                line: line_no,
                message: format!("field '{key}' repeated in section '{}'", section.id),
            });
        }
        section.fields.insert(key.clone(), caps["value"].to_string());
        section.last_key = Some(key);
    }

    if let Some(done) = pending {
        document.add_section(done.finish())?;
    }
    Ok(document)
}

/// Reads and parses metadata text from a reader.
///
/// # Errors
///
/// Returns [`FdpError::Io`] if reading fails, or any [`parse_str`] error.
pub fn from_reader<R: Read>(mut reader: R) -> Result<MetadataDocument> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_str(&text)
}

/// Reads and parses a metadata file.
///
/// # Errors
///
/// Returns [`FdpError::Io`] if the file cannot be read, or any [`parse_str`] error.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<MetadataDocument> {
    from_reader(File::open(path)?)
}

/// Parses a JSON document of the form `{"<header>": {"<field>": value}}`,
/// where a value is a string or an array of strings.
///
/// # Errors
///
/// Returns [`FdpError::Parse`] for malformed JSON,
/// [`FdpError::InvalidSectionHeader`] for bad headers and
/// [`FdpError::DuplicateSection`] for headers naming the same section.
pub fn from_json_str(text: &str) -> Result<MetadataDocument> {
    let raw: RawDocument = serde_json::from_str(text).map_err(|e| FdpError::Parse {
        line: e.line().max(1),
        message: e.to_string(),
    })?;
    MetadataDocument::try_from(raw)
}
