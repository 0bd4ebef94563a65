//! Common test helpers shared across the integration test suite.

#![allow(dead_code)]

use fdpmeta::{loader, GraphConfig, GraphMapper, MetadataDocument, SectionKind};

/// Path of the sample configuration shipped with the tests.
pub const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/fdp.ini");

/// Base URI used by mapping tests.
pub const BASE: &str = "http://example.org";

/// The five fields every section must declare.
pub fn core_fields(title: &str) -> String {
    format!(
        "title = {title}\n\
         publisher = http://example.org/publisher\n\
         version = 1.0\n\
         issued = 2016-10-27\n\
         modified = 2016-10-27\n"
    )
}

/// A valid document with one resource per level.
pub fn minimal_text() -> String {
    let mut text = String::new();
    text.push_str("[fdp]\n");
    text.push_str(&core_fields("Repository"));
    text.push_str("fdp_id = fdp-1\ncatalog_id = cat1\n\n");

    text.push_str("[catalog/cat1]\n");
    text.push_str(&core_fields("Catalog"));
    text.push_str("dataset_id = ds1\ntheme_taxonomy = http://dbpedia.org/resource/Biology\n\n");

    text.push_str("[dataset/ds1]\n");
    text.push_str(&core_fields("Dataset"));
    text.push_str("distribution_id = dist1\ntheme = http://dbpedia.org/resource/Genome\n\n");

    text.push_str("[distribution/dist1]\n");
    text.push_str(&core_fields("Distribution"));
    text.push_str(
        "download_url = http://example.org/data.ttl\n\
         media_type = text/turtle\n\
         license = http://creativecommons.org/licenses/by/4.0/\n",
    );
    text
}

/// Parses [`minimal_text`].
pub fn minimal_document() -> MetadataDocument {
    loader::parse_str(&minimal_text()).expect("minimal document parses")
}

/// Loads the sample configuration.
pub fn fixture_document() -> MetadataDocument {
    loader::from_path(FIXTURE).expect("fixture parses")
}

fn id_list(values: &[String]) -> String {
    values.iter().map(|v| format!("\n    {v}")).collect()
}

fn catalog_block(id: &str, datasets: &[String]) -> String {
    format!(
        "[{}/{id}]\n{}dataset_id ={}\ntheme_taxonomy = http://dbpedia.org/resource/Biology\n\n",
        SectionKind::Catalog,
        core_fields(&format!("Catalog {id}")),
        id_list(datasets)
    )
}

fn dataset_block(id: &str, distributions: &[String]) -> String {
    format!(
        "[{}/{id}]\n{}distribution_id ={}\ntheme = http://dbpedia.org/resource/Genome\n\n",
        SectionKind::Dataset,
        core_fields(&format!("Dataset {id}")),
        id_list(distributions)
    )
}

fn distribution_block(id: &str) -> String {
    format!(
        "[{}/{id}]\n{}download_url = http://example.org/files/{id}.ttl\n\
         media_type = text/turtle\n\
         license = http://creativecommons.org/licenses/by/4.0/\n\n",
        SectionKind::Distribution,
        core_fields(&format!("Distribution {id}"))
    )
}

fn repository_block(catalogs: &[String]) -> String {
    format!(
        "[fdp]\n{}fdp_id = fdp-gen\ncatalog_id ={}\n\n",
        core_fields("Generated repository"),
        id_list(catalogs)
    )
}

/// Builds a valid document: one catalog holding one dataset with
/// `distributions` distributions `dist0..`.
pub fn generated_text(distributions: usize) -> String {
    let catalog = vec!["cat".to_string()];
    let dataset = vec!["ds".to_string()];
    let ids: Vec<String> = (0..distributions).map(|i| format!("dist{i}")).collect();

    let mut text = repository_block(&catalog);
    text.push_str(&catalog_block("cat", &dataset));
    text.push_str(&dataset_block("ds", &ids));
    for id in &ids {
        text.push_str(&distribution_block(id));
    }
    text
}

/// Builds a document with `catalogs` sibling catalogs `c0..`, each listing
/// only its own dataset `c<i>-d`, which holds one distribution `c<i>-x`.
pub fn sibling_text(catalogs: usize) -> String {
    let catalog_ids: Vec<String> = (0..catalogs).map(|i| format!("c{i}")).collect();

    let mut text = repository_block(&catalog_ids);
    for c in &catalog_ids {
        let dataset = format!("{c}-d");
        let distribution = format!("{c}-x");
        text.push_str(&catalog_block(c, &[dataset.clone()]));
        text.push_str(&dataset_block(&dataset, &[distribution.clone()]));
        text.push_str(&distribution_block(&distribution));
    }
    text
}

/// A mapper over [`BASE`] with default settings.
pub fn mapper() -> GraphMapper {
    GraphMapper::new(GraphConfig::new(BASE)).expect("base URI is valid")
}
