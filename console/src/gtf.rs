use clap::Args;
use mupit::gtf::{GtfReaderBuilder, MalformedPolicy};
use mupit::io::is_url;

use crate::utils::{check_input, OutputArgs, OutputFormat};

#[derive(Args, Debug, Clone)]
pub(crate) struct GtfArgs {
    #[arg(help = "Path or http(s) URL of the GTF/GFF file, optionally compressed.")]
    input:          String,
    #[clap(flatten)]
    output:         OutputArgs,
    #[arg(
        long,
        default_value_t = false,
        help = "Skip records with fewer than 9 fields instead of failing."
    )]
    skip_malformed: bool,
    #[arg(
        long,
        default_value = ",",
        help = "Separator joining list values in TSV output."
    )]
    list_separator: String,
    #[arg(long, default_value = "#", help = "Prefix of comment lines.")]
    comment_prefix: String,
}

impl GtfArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        if !is_url(&self.input) {
            check_input(self.input.as_ref())?;
        }
        let policy = if self.skip_malformed {
            MalformedPolicy::Skip
        }
        else {
            MalformedPolicy::Abort
        };

        let table = GtfReaderBuilder::default()
            .with_comment_prefix(self.comment_prefix.as_str())
            .with_malformed_policy(policy)
            .build(&self.input)?
            .into_table()?;

        // Nested list columns cannot be written as delimited text.
        let mut frame = match self.output.format {
            OutputFormat::Tsv => table.into_flat_dataframe(&self.list_separator)?,
            OutputFormat::Ipc => table.into_dataframe()?,
        };
        self.output.write(&mut frame)
    }
}
