mod gtf;
mod tables;
mod utils;

use clap::{Parser, Subcommand};
use console::style;
use gtf::GtfArgs;
use tables::{DeNovoArgs, KnownGenesArgs, RatesArgs};
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Convert a GTF/GFF annotation into a table.
    Gtf {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  GtfArgs,
    },
    /// Standardise DDD de novo calls.
    Denovos {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  DeNovoArgs,
    },
    /// Normalise the known developmental disorder gene catalog.
    KnownGenes {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  KnownGenesArgs,
    },
    /// Load per-gene mutation rates.
    Rates {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  RatesArgs,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        MainMenu::Gtf { utils, args } => {
            utils.setup()?;
            args.run()
        },
        MainMenu::Denovos { utils, args } => {
            utils.setup()?;
            args.run()
        },
        MainMenu::KnownGenes { utils, args } => {
            utils.setup()?;
            args.run()
        },
        MainMenu::Rates { utils, args } => {
            utils.setup()?;
            args.run()
        },
    }
}

fn main() {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("error:").red().bold(), e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() { Cli::command().debug_assert(); }

    #[test]
    fn test_gtf_command_writes_tsv() -> anyhow::Result<()> {
        let mut input = tempfile::Builder::new()
            .suffix(".gtf")
            .tempfile()?;
        writeln!(input, "chr1\t.\tgene\t10\t20\t.\t+\t.\tgene_id \"A\"; note \"x,y\"")?;
        writeln!(input, "chr1\t.\texon\t12\t18\t.\t+\t.\tgene_id \"A\"; exon_number \"1\"")?;
        input.flush()?;
        let output = tempfile::Builder::new()
            .suffix(".tsv")
            .tempfile()?;

        let cli = Cli::try_parse_from([
            "mupit",
            "gtf",
            input.path().to_str().unwrap(),
            "-o",
            output.path().to_str().unwrap(),
            "--list-separator",
            "|",
        ])?;
        match cli.command {
            MainMenu::Gtf { args, .. } => args.run()?,
            other => panic!("unexpected command {:?}", other),
        }

        let written = std::fs::read_to_string(output.path())?;
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("seqname\tsource\tfeature\tstart\tend\tscore\tstrand\tframe\tgene_id\tnote\texon_number")
        );
        assert_eq!(lines.next(), Some("chr1\t\tgene\t10\t20\t\t+\t\tA\tx|y\t"));
        assert_eq!(lines.next(), Some("chr1\t\texon\t12\t18\t\t+\t\tA\t\t1"));
        Ok(())
    }
}
