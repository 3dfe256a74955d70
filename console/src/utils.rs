use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use console::style;
use log::{info, LevelFilter};
use polars::prelude::*;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short,
        long,
        default_value_t = false,
        help = "Print debug messages.",
        help_heading = "UTILS"
    )]
    pub verbose: bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        let mut builder = pretty_env_logger::formatted_builder();
        match std::env::var("RUST_LOG") {
            Ok(filters) if !self.verbose => {
                builder.parse_filters(&filters);
            },
            _ => {
                builder.filter_level(if self.verbose {
                    LevelFilter::Debug
                }
                else {
                    LevelFilter::Info
                });
            },
        }
        builder.try_init()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Eq, PartialEq)]
pub(crate) enum OutputFormat {
    Tsv,
    Ipc,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct OutputArgs {
    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Path for the generated output file."
    )]
    pub output: PathBuf,
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value_t = OutputFormat::Tsv,
        help = "Output file format."
    )]
    pub format: OutputFormat,
}

impl OutputArgs {
    pub fn write(
        &self,
        frame: &mut DataFrame,
    ) -> anyhow::Result<()> {
        if self.output.is_dir() {
            anyhow::bail!(
                "Output path {} is a directory.",
                style(self.output.display()).red()
            );
        }
        let handle = File::create(&self.output)?;
        match self.format {
            OutputFormat::Tsv => {
                CsvWriter::new(handle)
                    .with_separator(b'\t')
                    .include_header(true)
                    .finish(frame)?
            },
            OutputFormat::Ipc => IpcWriter::new(handle).finish(frame)?,
        }
        info!(
            "Wrote {} rows to {}",
            frame.height(),
            self.output.display()
        );
        Ok(())
    }
}

pub(crate) fn check_input(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Path {} does not exist.", style(path.display()).red());
    }
    if !path.is_file() {
        anyhow::bail!("Path {} is not a file.", style(path.display()).red());
    }
    Ok(())
}
