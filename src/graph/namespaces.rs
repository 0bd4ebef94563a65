//! Vocabulary namespaces and terms used in FDP metadata graphs.
//!
//! Metadata is described with DCAT and Dublin Core terms, following the
//! FAIR Data Point profile.

/// RDF namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// RDF Schema namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// XML Schema namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Dublin Core terms namespace.
pub const DCT: &str = "http://purl.org/dc/terms/";

/// Data Catalog Vocabulary namespace.
pub const DCAT: &str = "http://www.w3.org/ns/dcat#";

/// LOC ISO 639-1 language vocabulary namespace.
pub const LANG: &str = "http://id.loc.gov/vocabulary/iso639-1/";

/// DBpedia resource namespace, commonly used for themes.
pub const DBPEDIA: &str = "http://dbpedia.org/resource/";

/// Prefixes registered with serializers that support them.
pub const PREFIXES: [(&str, &str); 7] = [
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("xsd", XSD),
    ("dct", DCT),
    ("dcat", DCAT),
    ("lang", LANG),
    ("dbp", DBPEDIA),
];

/// Resource class local names.
pub mod classes {
    /// `dct:Agent`, the type of the repository node.
    pub const AGENT: &str = "Agent";
    /// `dcat:Catalog`.
    pub const CATALOG: &str = "Catalog";
    /// `dcat:Dataset`.
    pub const DATASET: &str = "Dataset";
    /// `dcat:Distribution`.
    pub const DISTRIBUTION: &str = "Distribution";
}

/// XSD datatype local names.
pub mod datatypes {
    /// `xsd:string`.
    pub const STRING: &str = "string";
    /// `xsd:date`.
    pub const DATE: &str = "date";
    /// `xsd:anyURI`.
    pub const ANY_URI: &str = "anyURI";
}

/// Builds a full IRI from a namespace and a local name.
#[must_use]
pub fn iri(namespace: &str, local: &str) -> String {
    format!("{namespace}{local}")
}
