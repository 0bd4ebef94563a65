//! Schema and referential-integrity validation of metadata documents.
//!
//! [`ConfigValidator`] checks a [`MetadataDocument`] against a
//! [`MetadataSchema`] and the hierarchy's cross-section rules. Validation is
//! fail-fast; checks run in this order:
//!
//! 1. every section kind is declared at least once ([`FdpError::MissingSection`]);
//! 2. resource ids in section headers are globally unique
//!    ([`FdpError::DuplicateResourceId`]);
//! 3. per section, in declaration order, every required field is present
//!    ([`FdpError::MissingField`]) and every id declared by an id field is
//!    globally unique ([`FdpError::DuplicateResourceId`]). Each parent section's id-list field must also list exactly the ids of
//!    all child section headers ([`FdpError::DanglingReference`]).
//!
//! On success the document is wrapped in [`ValidatedMetadata`], which exposes
//! the flat `(section, field, value)` stream consumed by the graph mapper.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use crate::error::{FdpError, Result};
use crate::schema::MetadataSchema;
use crate::section::{FieldValue, MetadataDocument, Section, SectionId, SectionKind};

/// Resource ids taken from section headers, per kind.
type HeaderIds<'a> = BTreeMap<SectionKind, BTreeSet<&'a str>>;

/// One `(section, field, value)` entry of a validated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataTriple<'a> {
    /// Header of the section declaring the field.
    pub section: &'a SectionId,
    /// Field name.
    pub field: &'a str,
    /// One value; multi-valued fields yield one triple per value.
    pub value: &'a str,
}

/// A document that passed validation. Read-only.
#[derive(Debug, Clone)]
pub struct ValidatedMetadata {
    document: MetadataDocument,
}

impl ValidatedMetadata {
    /// The validated document.
    #[must_use]
    pub const fn document(&self) -> &MetadataDocument {
        &self.document
    }

    /// Unwraps the validated document.
    #[must_use]
    pub fn into_document(self) -> MetadataDocument {
        self.document
    }

    /// Lazily yields every field value in section, field, value order.
    pub fn triples(&self) -> impl Iterator<Item = MetadataTriple<'_>> {
        self.document.sections().flat_map(|section| {
            section.fields().flat_map(move |(field, value)| {
                value.values().map(move |value| MetadataTriple {
                    section: section.id(),
                    field,
                    value,
                })
            })
        })
    }
}

/// Validator for metadata documents.
#[derive(Debug, Clone, Default)]
pub struct ConfigValidator {
    schema: MetadataSchema,
}

impl ConfigValidator {
    /// Creates a validator for the given schema.
    #[must_use]
    pub const fn new(schema: MetadataSchema) -> Self {
        Self { schema }
    }

    /// The schema this validator enforces.
    #[must_use]
    pub const fn schema(&self) -> &MetadataSchema {
        &self.schema
    }

    /// Validates a document.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as [`FdpError::MissingSection`],
    /// [`FdpError::MissingField`], [`FdpError::DuplicateResourceId`] or
    /// [`FdpError::DanglingReference`].
    pub fn validate(&self, document: MetadataDocument) -> Result<ValidatedMetadata> {
        Self::check_sections(&document)?;
        let headers = Self::header_ids(&document)?;

        let mut declared_ids = HashSet::new();
        for section in document.sections() {
            self.check_fields(section)?;
            Self::check_id_fields(section, &mut declared_ids)?;
            Self::check_references(section, &headers)?;
        }

        debug!(
            sections = document.len(),
            resource_ids = declared_ids.len(),
            "metadata document validated"
        );
        Ok(ValidatedMetadata { document })
    }

    fn check_sections(document: &MetadataDocument) -> Result<()> {
        for kind in SectionKind::ALL {
            if document.sections_of(kind).next().is_none() {
                return Err(FdpError::MissingSection(kind));
            }
        }
        Ok(())
    }

    /// Collects header ids per kind, rejecting an id used by two headers.
    fn header_ids(document: &MetadataDocument) -> Result<HeaderIds<'_>> {
        let mut seen = HashSet::new();
        let mut headers = HeaderIds::new();
        for id in document.sections().map(Section::id) {
            let Some(resource_id) = id.id() else {
                continue;
            };
            if !seen.insert(resource_id) {
                return Err(FdpError::DuplicateResourceId(resource_id.to_string()));
            }
            headers.entry(id.kind()).or_default().insert(resource_id);
        }
        Ok(headers)
    }

    fn check_fields(&self, section: &Section) -> Result<()> {
        let kind = section.id().kind();
        match self
            .schema
            .required(kind)
            .iter()
            .find(|entry| !entry.is_satisfied_by(section))
        {
            Some(entry) => Err(FdpError::MissingField {
                field: entry.to_string(),
                section: section.id().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn check_id_fields<'a>(section: &'a Section, declared: &mut HashSet<&'a str>) -> Result<()> {
        let kind = section.id().kind();
        for (field, value) in section.fields() {
            if !declares_ids(kind, field) {
                continue;
            }
            for id in value.values() {
                if !declared.insert(id) {
                    return Err(FdpError::DuplicateResourceId(id.to_string()));
                }
            }
        }
        Ok(())
    }

    /// A parent section must list exactly the ids of every child section.
    fn check_references(section: &Section, headers: &HeaderIds<'_>) -> Result<()> {
        let parent = section.id().kind();
        let Some(child) = parent.child() else {
            return Ok(());
        };

        let referenced: BTreeSet<&str> = section
            .get(child.id_field())
            .into_iter()
            .flat_map(FieldValue::values)
            .collect();
        let empty = BTreeSet::new();
        let declared = headers.get(&child).unwrap_or(&empty);

        if &referenced != declared {
            debug!(
                section = %section.id(),
                %child,
                ?referenced,
                ?declared,
                "reference mismatch"
            );
            return Err(FdpError::DanglingReference { parent, child });
        }
        Ok(())
    }
}

/// Whether `field` in a section of `kind` declares resource ids: the
/// repository's own `fdp_id`, or the kind's child id-list field.
fn declares_ids(kind: SectionKind, field: &str) -> bool {
    (kind == SectionKind::Repository && field == SectionKind::Repository.id_field())
        || kind.child_list_field() == Some(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader;

    const MINIMAL: &str = "\
[fdp]
title = Repository
publisher = http://example.org/publisher
version = 1.0
issued = 2016-01-01
modified = 2016-01-02
fdp_id = fdp-1
catalog_id = cat1

[catalog/cat1]
title = Catalog
publisher = http://example.org/publisher
version = 1.0
issued = 2016-01-01
modified = 2016-01-02
dataset_id = ds1
theme_taxonomy = http://dbpedia.org/resource/Biology

[dataset/ds1]
title = Dataset
publisher = http://example.org/publisher
version = 1.0
issued = 2016-01-01
modified = 2016-01-02
distribution_id = dist1
theme = http://dbpedia.org/resource/Genome
keyword =
    genome
    sequence

[distribution/dist1]
title = Distribution
publisher = http://example.org/publisher
version = 1.0
issued = 2016-01-01
modified = 2016-01-02
download_url = http://example.org/data.ttl
media_type = text/turtle
license = http://creativecommons.org/licenses/by-nd/4.0/
";

    fn validate(text: &str) -> Result<ValidatedMetadata> {
        ConfigValidator::default().validate(loader::parse_str(text)?)
    }

    #[test]
    fn test_minimal_document_is_valid() {
        let validated = validate(MINIMAL).expect("minimal document should validate");
        // 7 + 7 + 9 (keyword expands to two values) + 8
        assert_eq!(validated.triples().count(), 31);
    }

    #[test]
    fn test_triples_preserve_order() {
        let validated = validate(MINIMAL).unwrap();
        let first = validated.triples().next().unwrap();
        assert_eq!(first.section, &SectionId::repository());
        assert_eq!(first.field, "title");
        assert_eq!(first.value, "Repository");

        let keywords: Vec<&str> = validated
            .triples()
            .filter(|t| t.field == "keyword")
            .map(|t| t.value)
            .collect();
        assert_eq!(keywords, ["genome", "sequence"]);
    }

    #[test]
    fn test_missing_section() {
        let text = MINIMAL.replace("[distribution/dist1]", "[catalog/extra]");
        let err = validate(&text).unwrap_err();
        assert!(matches!(
            err,
            FdpError::MissingSection(SectionKind::Distribution)
        ));
    }

    #[test]
    fn test_missing_field() {
        let text = MINIMAL.replace("theme = http://dbpedia.org/resource/Genome\n", "");
        match validate(&text).unwrap_err() {
            FdpError::MissingField { field, section } => {
                assert_eq!(field, "theme");
                assert_eq!(section, "dataset/ds1");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_alternative_pair() {
        let text = MINIMAL.replace("download_url = http://example.org/data.ttl\n", "");
        match validate(&text).unwrap_err() {
            FdpError::MissingField { field, section } => {
                assert_eq!(field, "access_url|download_url");
                assert_eq!(section, "distribution/dist1");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_access_url_satisfies_alternative() {
        let text = MINIMAL.replace("download_url", "access_url");
        assert!(validate(&text).is_ok());
    }

    #[test]
    fn test_duplicate_id_across_kinds() {
        let text = MINIMAL.replace("fdp_id = fdp-1", "fdp_id = cat1");
        let err = validate(&text).unwrap_err();
        assert!(matches!(err, FdpError::DuplicateResourceId(id) if id == "cat1"));
    }

    #[test]
    fn test_duplicate_header_id() {
        let text = MINIMAL.replace("[distribution/dist1]", "[distribution/ds1]");
        let err = validate(&text).unwrap_err();
        assert!(matches!(err, FdpError::DuplicateResourceId(id) if id == "ds1"));
    }

    #[test]
    fn test_child_listed_twice() {
        let text = MINIMAL.replace("dataset_id = ds1", "dataset_id =\n    ds1\n    ds1");
        let err = validate(&text).unwrap_err();
        assert!(matches!(err, FdpError::DuplicateResourceId(id) if id == "ds1"));
    }

    #[test]
    fn test_reference_without_section() {
        let text = MINIMAL.replace("distribution_id = dist1", "distribution_id =\n    dist1\n    dist2");
        let err = validate(&text).unwrap_err();
        assert!(matches!(
            err,
            FdpError::DanglingReference {
                parent: SectionKind::Dataset,
                child: SectionKind::Distribution
            }
        ));
    }

    #[test]
    fn test_section_without_reference() {
        let extra = MINIMAL
            .split("[distribution/dist1]")
            .nth(1)
            .unwrap()
            .to_string();
        let text = format!("{MINIMAL}\n[distribution/dist2]{extra}");
        let err = validate(&text).unwrap_err();
        assert!(matches!(
            err,
            FdpError::DanglingReference {
                parent: SectionKind::Dataset,
                child: SectionKind::Distribution
            }
        ));
    }

    #[test]
    fn test_siblings_cannot_split_children() {
        let catalog = MINIMAL
            .split("[catalog/cat1]")
            .nth(1)
            .unwrap()
            .split("[dataset/ds1]")
            .next()
            .unwrap()
            .replace("dataset_id = ds1", "dataset_id = ds2");
        let dataset = MINIMAL
            .split("[dataset/ds1]")
            .nth(1)
            .unwrap()
            .split("[distribution/dist1]")
            .next()
            .unwrap()
            .replace("distribution_id = dist1", "distribution_id = dist2");
        let distribution = MINIMAL.split("[distribution/dist1]").nth(1).unwrap();
        let text = format!(
            "{}\n[catalog/cat2]{catalog}\n[dataset/ds2]{dataset}\n[distribution/dist2]{distribution}",
            MINIMAL.replace("catalog_id = cat1", "catalog_id =\n    cat1\n    cat2")
        );

        // cat1 lists only ds1 while ds1 and ds2 both exist
        let err = validate(&text).unwrap_err();
        assert!(matches!(
            err,
            FdpError::DanglingReference {
                parent: SectionKind::Catalog,
                child: SectionKind::Dataset
            }
        ));
    }

    #[test]
    fn test_siblings_listing_all_children_collide() {
        let catalog = MINIMAL
            .split("[catalog/cat1]")
            .nth(1)
            .unwrap()
            .split("[dataset/ds1]")
            .next()
            .unwrap()
            .to_string();
        let text = MINIMAL.replace("catalog_id = cat1", "catalog_id =\n    cat1\n    cat2")
            + "\n[catalog/cat2]"
            + &catalog;

        let err = validate(&text).unwrap_err();
        assert!(matches!(err, FdpError::DuplicateResourceId(id) if id == "ds1"));
    }

    #[test]
    fn test_custom_schema_is_enforced() {
        let schema = MetadataSchema::new([(SectionKind::Catalog, vec!["description"])]).unwrap();
        let err = ConfigValidator::new(schema)
            .validate(loader::parse_str(MINIMAL).unwrap())
            .unwrap_err();
        assert!(matches!(err, FdpError::MissingField { field, .. } if field == "description"));
    }
}
