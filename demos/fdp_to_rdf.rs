//! Converts a FAIR Data Point configuration to RDF.
//!
//! Run with:
//! `cargo run --example fdp_to_rdf -- tests/data/fdp.ini example.org turtle`
//!
//! The format argument accepts a name, file extension or MIME type and
//! defaults to JSON-LD. Set `RUST_LOG=fdpmeta=debug` for mapping details.

use anyhow::{bail, Context};
use fdpmeta::{loader, ConfigValidator, GraphConfig, GraphMapper, RdfFormat};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(path), Some(base_uri)) = (args.next(), args.next()) else {
        bail!("usage: fdp_to_rdf <config.ini> <base-uri> [format]");
    };
    let format: RdfFormat = match args.next() {
        Some(name) => name.parse()?,
        None => RdfFormat::default(),
    };

    let document =
        loader::from_path(&path).with_context(|| format!("failed to load {path}"))?;
    let validated = ConfigValidator::default()
        .validate(document)
        .with_context(|| format!("{path} is not a valid metadata configuration"))?;

    let mut mapper = GraphMapper::new(GraphConfig::new(base_uri).with_output_format(format))?;
    let statements = mapper.ingest_all(&validated)?;
    tracing::info!(
        statements,
        contexts = mapper.contexts().count(),
        %format,
        "metadata mapped"
    );

    for (uri, body) in mapper.serialize_all(format)? {
        println!("# <{uri}>");
        println!("{body}");
    }
    Ok(())
}
