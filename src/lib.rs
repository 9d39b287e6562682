//! Compiles a list of IPv4 CIDR blocks into a table of `(start, end)` address
//! ranges, emitted as source code for a routing classifier to search.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod source;

use colored::Colorize;
use config::Config;
use error::TableError;
use output::{emit, FileSink};
use processing::{find_overlaps, log_overlaps, normalize_ranges, split_tokens, RangeTableBuilder};
use source::{CachedSource, FileSource, HttpSource, RangeSource};
use std::error::Error;
use std::path::PathBuf;

/// Turn a raw CIDR list into the emitted table text.
///
/// Fails on the first malformed CIDR; nothing is emitted in that case.
pub fn compile_table(text: &str, config: &Config) -> Result<String, TableError> {
    let tokens = split_tokens(text);
    log::info!("# Got {} candidate tokens", tokens.len());

    let mut entries = RangeTableBuilder::new(config.short_tokens).build(&tokens)?;
    log_overlaps(&entries, &find_overlaps(&entries));
    if config.normalize {
        entries = normalize_ranges(entries);
    }

    emit(&entries, &config.emit_config())
}

/// Fetch from `source`, then compile. The fetch completes before any parsing starts.
pub async fn generate_table<S: RangeSource>(
    source: &S,
    config: &Config,
) -> Result<String, Box<dyn Error>> {
    log::info!("#Start generate_table() from {}", source.name());
    let text = source.fetch().await?;
    Ok(compile_table(&text, config)?)
}

/// Generate the table described by `config` and write it to `config.output_file`.
pub async fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let table = if let Some(file) = &config.source_file {
        generate_table(&FileSource::new(file), config).await?
    } else if config.cache_dir.is_some() || config.cache_file.is_some() {
        let dir = config.cache_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut source = CachedSource::new(HttpSource::new(&config.source_url), dir);
        if let Some(file) = &config.cache_file {
            source = source.with_cache_file(file);
        }
        generate_table(&source, config).await?
    } else {
        generate_table(&HttpSource::new(&config.source_url), config).await?
    };

    let sink = FileSink::new(&config.output_file);
    sink.write(&table)?;
    log::info!(
        "#{}# {} lines written to {}",
        "DONE".on_green(),
        table.lines().count(),
        sink.path().display()
    );
    Ok(())
}
