//! Validation integration tests.
//!
//! These tests run complete configurations through the loader and the
//! validator, covering the section, field and cross-reference checks.

mod common;

use common::{core_fields, fixture_document, minimal_document, minimal_text, sibling_text};
use fdpmeta::{loader, ConfigValidator, FdpError, MetadataSchema, SectionId, SectionKind};

fn validate_text(text: &str) -> fdpmeta::Result<fdpmeta::ValidatedMetadata> {
    ConfigValidator::default().validate(loader::parse_str(text)?)
}

// ============================================================================
// Valid documents
// ============================================================================

#[test]
fn test_fixture_is_valid() {
    let validated = ConfigValidator::default()
        .validate(fixture_document())
        .expect("fixture validates");

    let document = validated.document();
    assert_eq!(document.len(), 6);
    assert_eq!(document.sections_of(SectionKind::Catalog).count(), 1);
    assert_eq!(document.sections_of(SectionKind::Dataset).count(), 1);
    assert_eq!(document.sections_of(SectionKind::Distribution).count(), 3);
}

#[test]
fn test_fixture_triples_expand_multi_values() {
    let validated = ConfigValidator::default()
        .validate(fixture_document())
        .unwrap();

    let distributions: Vec<&str> = validated
        .triples()
        .filter(|t| t.section.kind() == SectionKind::Dataset && t.field == "distribution_id")
        .map(|t| t.value)
        .collect();
    assert_eq!(distributions, ["abstracts-ttl", "abstracts-sparql", "abstracts-nt"]);

    let keywords: Vec<&str> = validated
        .triples()
        .filter(|t| t.field == "keyword")
        .map(|t| t.value)
        .collect();
    assert_eq!(keywords, ["text mining", "abstracts"]);
}

#[test]
fn test_triples_follow_document_order() {
    let validated = ConfigValidator::default()
        .validate(minimal_document())
        .unwrap();
    let sections: Vec<String> = validated
        .triples()
        .map(|t| t.section.to_string())
        .fold(Vec::new(), |mut acc, s| {
            if acc.last() != Some(&s) {
                acc.push(s);
            }
            acc
        });
    assert_eq!(
        sections,
        ["fdp", "catalog/cat1", "dataset/ds1", "distribution/dist1"]
    );
}

#[test]
fn test_repository_alias_header() {
    let text = minimal_text().replace("[fdp]", "[repository]");
    assert!(validate_text(&text).is_ok());
}

// ============================================================================
// Missing sections and fields
// ============================================================================

#[test]
fn test_missing_distribution_section() {
    let text = minimal_text();
    let cut = text.find("[distribution/dist1]").unwrap();
    let err = validate_text(&text[..cut]).unwrap_err();
    assert!(matches!(err, FdpError::MissingSection(SectionKind::Distribution)));
    assert_eq!(err.to_string(), "Section 'distribution' is not found.");
}

#[test]
fn test_missing_repository_section() {
    let text = minimal_text();
    let start = text.find("[catalog/cat1]").unwrap();
    let err = validate_text(&text[start..]).unwrap_err();
    assert!(matches!(err, FdpError::MissingSection(SectionKind::Repository)));
}

#[test]
fn test_missing_core_field_is_reported_with_section() {
    // sections are checked in document order, so the repository fails first
    let text = minimal_text().replacen("version = 1.0\n", "", 2);
    let err = validate_text(&text).unwrap_err();
    match err {
        FdpError::MissingField { field, section } => {
            assert_eq!(field, "version");
            assert_eq!(section, "fdp");
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_field_message() {
    let text = minimal_text().replace("theme = http://dbpedia.org/resource/Genome\n", "");
    let err = validate_text(&text).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Field 'theme' is not found in section 'dataset/ds1'."
    );
}

#[test]
fn test_distribution_url_alternative() {
    let access = minimal_text().replace("download_url", "access_url");
    assert!(validate_text(&access).is_ok());

    let neither = minimal_text().replace("download_url = http://example.org/data.ttl\n", "");
    let err = validate_text(&neither).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Field 'access_url|download_url' is not found in section 'distribution/dist1'."
    );
}

// ============================================================================
// Identity and references
// ============================================================================

#[test]
fn test_duplicate_header_rejected_by_loader() {
    let mut text = minimal_text();
    text.push_str("\n[catalog/cat1]\n");
    text.push_str(&core_fields("Again"));
    assert!(matches!(
        loader::parse_str(&text),
        Err(FdpError::DuplicateSection(header)) if header == "catalog/cat1"
    ));
}

#[test]
fn test_dataset_id_reused_as_distribution_id() {
    let text = minimal_text()
        .replace("distribution_id = dist1", "distribution_id = ds1")
        .replace("[distribution/dist1]", "[distribution/ds1]");
    assert!(matches!(
        validate_text(&text),
        Err(FdpError::DuplicateResourceId(id)) if id == "ds1"
    ));
}

#[test]
fn test_fdp_id_must_be_unique() {
    let text = minimal_text().replace("fdp_id = fdp-1", "fdp_id = cat1");
    assert!(matches!(
        validate_text(&text),
        Err(FdpError::DuplicateResourceId(id)) if id == "cat1"
    ));
}

#[test]
fn test_listed_child_without_section() {
    let text = minimal_text().replace("dataset_id = ds1", "dataset_id =\n    ds1\n    ds2");
    assert!(matches!(
        validate_text(&text),
        Err(FdpError::DanglingReference {
            parent: SectionKind::Catalog,
            child: SectionKind::Dataset,
        })
    ));
}

#[test]
fn test_child_section_not_listed_by_parent() {
    let mut text = minimal_text();
    text.push_str("\n[distribution/orphan]\n");
    text.push_str(&core_fields("Orphan"));
    text.push_str(
        "access_url = http://example.org/sparql\n\
         media_type = text/turtle\n\
         license = http://creativecommons.org/licenses/by/4.0/\n",
    );
    let err = validate_text(&text).unwrap_err();
    assert_eq!(
        err.to_string(),
        "distribution_id(s) in the 'dataset' section are not referenced in the \
         'distribution/<distribution_id>' section header(s) or vice versa."
    );
}

#[test]
fn test_sibling_catalogs_splitting_datasets() {
    let err = validate_text(&sibling_text(2)).unwrap_err();
    assert!(matches!(
        err,
        FdpError::DanglingReference {
            parent: SectionKind::Catalog,
            child: SectionKind::Dataset,
        }
    ));

    // a single catalog owning its dataset is fine
    assert!(validate_text(&sibling_text(1)).is_ok());
}

#[test]
fn test_each_parent_lists_every_child() {
    let document = fixture_document();
    let listed: Vec<&str> = document
        .sections_of(SectionKind::Dataset)
        .filter_map(|s| s.get("distribution_id"))
        .flat_map(|value| value.values())
        .collect();
    let headers: Vec<&str> = document
        .sections_of(SectionKind::Distribution)
        .filter_map(|s| s.id().id())
        .collect();
    assert_eq!(listed, headers);
    assert!(ConfigValidator::default().validate(document).is_ok());
}

#[test]
fn test_section_lookup_by_header() {
    let document = minimal_document();
    let id: SectionId = "dataset/ds1".parse().unwrap();
    let section = document.section(&id).unwrap();
    assert_eq!(
        section.get("theme").unwrap().values().next(),
        Some("http://dbpedia.org/resource/Genome")
    );
}

// ============================================================================
// Custom schemas
// ============================================================================

#[test]
fn test_custom_schema_requires_extra_field() {
    let schema = MetadataSchema::new([
        (SectionKind::Repository, vec!["title", "fdp_id", "catalog_id"]),
        (SectionKind::Catalog, vec!["title", "dataset_id"]),
        (SectionKind::Dataset, vec!["title", "distribution_id", "keyword"]),
        (SectionKind::Distribution, vec!["title"]),
    ])
    .unwrap();

    let err = ConfigValidator::new(schema)
        .validate(minimal_document())
        .unwrap_err();
    assert!(matches!(
        err,
        FdpError::MissingField { ref field, ref section }
            if field == "keyword" && section == "dataset/ds1"
    ));
}

#[test]
fn test_schema_rejects_alternative_on_id_field() {
    let result = MetadataSchema::new([(SectionKind::Catalog, vec!["dataset_id|theme"])]);
    assert!(matches!(result, Err(FdpError::InvalidSchema(_))));
}
