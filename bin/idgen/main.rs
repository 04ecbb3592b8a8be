mod cli;

use std::sync::Arc;

use clap::Parser;
use idgen::{CustomData, FileStore, IdGenerator};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, CLI};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = CLI::try_parse()?;
    let category = config.category;

    info!(
        category = %category,
        cache_dir = %config.cache_dir.display(),
        "starting id generator"
    );

    let store = FileStore::open(&config.cache_dir, category.cache_name())?;
    let generator = category.generator(Arc::new(store))?;

    match config.command {
        Command::Generate { count, data } => {
            let custom: CustomData = match data {
                Some(data) => serde_json::from_str(&data)?,
                None => CustomData::new(),
            };
            generate_main(&generator, count, &custom)
        }
        Command::Parse { id } => parse_main(&generator, &id),
    }
}

fn generate_main(
    generator: &IdGenerator,
    count: usize,
    custom: &CustomData,
) -> Result<(), Box<dyn std::error::Error>> {
    for _ in 0..count {
        let id = generator.generate_with(custom)?;
        let info = generator.parse_id(id)?;
        println!("{id} {}", serde_json::to_string(&info)?);
    }
    Ok(())
}

fn parse_main(generator: &IdGenerator, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let info = generator.parse(id)?;
    println!("{id} {}", serde_json::to_string(&info)?);
    Ok(())
}
