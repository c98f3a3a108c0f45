#![deny(missing_docs)]

//! # Annotate Command
//!
//! Reads a generated Go file, adds the YAML tag to every field of its
//! exported structs and prints the result or writes it back.
//!
//! 1. **Config**: defaults, then the optional YAML file, then flags.
//! 2. **Annotate**: parse, merge tags, patch the source.
//! 3. **Format**: optionally pipe the result through `gofmt`.
//! 4. **Output**: stdout, or the source file with `--write`.

use log::info;
use protoyamltag_core::{annotate_source, gofmt, AppResult, TaggerConfig};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the annotate command.
#[derive(clap::Args, Debug, Clone)]
pub struct AnnotateArgs {
    /// Target filename.
    #[clap(short = 'f', long)]
    pub filename: PathBuf,

    /// Write result to (source) file instead of stdout.
    #[clap(short = 'w', long)]
    pub write: bool,

    /// YAML file overriding the tagging rules (key, ignore_prefix, ...).
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Prefix of generator-internal fields that are tagged `-`.
    /// Overrides the config file.
    #[clap(long)]
    pub ignore_prefix: Option<String>,

    /// Pipe the result through gofmt to realign the tag column.
    #[clap(long)]
    pub gofmt: bool,

    /// gofmt binary used with `--gofmt`.
    #[clap(long, env = "GOFMT", default_value = "gofmt")]
    pub gofmt_bin: PathBuf,
}

impl AnnotateArgs {
    /// Resolves the tagging rules from the config file and flags.
    pub fn tagger_config(&self) -> AppResult<TaggerConfig> {
        let mut config = match &self.config {
            Some(path) => TaggerConfig::load(path)?,
            None => TaggerConfig::default(),
        };
        if let Some(prefix) = &self.ignore_prefix {
            config.ignore_prefix = prefix.clone();
        }
        Ok(config)
    }
}

/// Executes the annotate command, printing to `out` unless `--write` is set.
///
/// Nothing is written until the whole file has been transformed.
pub fn execute(args: &AnnotateArgs, out: &mut impl Write) -> AppResult<()> {
    let output = render(args)?;

    if args.write {
        fs::write(&args.filename, output)?;
        info!("Wrote {:?}", args.filename);
    } else {
        out.write_all(output.as_bytes())?;
        out.flush()?;
    }

    Ok(())
}

/// Produces the annotated (and optionally formatted) source.
pub fn render(args: &AnnotateArgs) -> AppResult<String> {
    let config = args.tagger_config()?;
    let source = fs::read_to_string(&args.filename)?;

    let annotated = annotate_source(&source, &config)?;
    info!(
        "{:?}: tagged {} field(s) in {} struct(s), skipped {}",
        args.filename, annotated.tagged, annotated.structs, annotated.skipped
    );

    if args.gofmt {
        gofmt(&annotated.source, &args.gofmt_bin)
    } else {
        Ok(annotated.source)
    }
}
