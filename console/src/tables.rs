use std::path::PathBuf;

use clap::Args;
use mupit::loaders::{get_ddd_rates, open_known_genes, standardise_ddd_de_novos};

use crate::utils::{check_input, OutputArgs};

#[derive(Args, Debug, Clone)]
pub(crate) struct DeNovoArgs {
    #[arg(help = "Tab separated DDD de novo calls.")]
    input:         PathBuf,
    #[clap(flatten)]
    output:        OutputArgs,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Additional input columns to keep, e.g. pp_dnm."
    )]
    extra_columns: Vec<String>,
}

impl DeNovoArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        check_input(&self.input)?;
        let extra = self
            .extra_columns
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>();
        let mut frame = standardise_ddd_de_novos(&self.input, &extra)?;
        self.output.write(&mut frame)
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct KnownGenesArgs {
    #[arg(help = "Tab or pipe separated known developmental disorder genes.")]
    input:  PathBuf,
    #[clap(flatten)]
    output: OutputArgs,
}

impl KnownGenesArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        check_input(&self.input)?;
        let mut frame = open_known_genes(&self.input)?;
        self.output.write(&mut frame)
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RatesArgs {
    #[arg(help = "Tab separated per-gene log10 mutation rates.")]
    input:  PathBuf,
    #[clap(flatten)]
    output: OutputArgs,
}

impl RatesArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        check_input(&self.input)?;
        let mut frame = get_ddd_rates(&self.input)?;
        self.output.write(&mut frame)
    }
}
