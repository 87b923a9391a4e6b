use std::{num::NonZeroUsize, path::PathBuf};

use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use dcb_core::config::{DcbConfig, DeviationMetric, FamilyWeighting, OutputFormat};
use dcb_core::constants::DEFAULT_MIN_CODON_COUNT;

use crate::log_level::{init_log, LogLevel};

/// Settings collected from the command line
#[derive(Debug)]
pub struct CliOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: DcbConfig,
}

/// Set up definition of command options for clap
pub fn cli_model() -> Command {
    Command::new("dcb")
        .about("Score the codon usage bias of predicted genes against their genome")
        .version(crate_version!())
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_parser(value_parser!(PathBuf))
                .value_name("FILE")
                .help("CDS FASTA from the gene predictor [default: stdin]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .value_name("FILE")
                .help("Output file [default: stdout]"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(value_parser!(OutputFormat))
                .value_name("FORMAT")
                .default_value("tsv")
                .help("Output format: tsv, usage, json"),
        )
        .arg(
            Arg::new("metric")
                .short('d')
                .long("metric")
                .value_parser(value_parser!(DeviationMetric))
                .value_name("METRIC")
                .default_value("absolute")
                .help("Per-family deviation: absolute or squared"),
        )
        .arg(
            Arg::new("weighting")
                .short('w')
                .long("weighting")
                .value_parser(value_parser!(FamilyWeighting))
                .value_name("WEIGHTING")
                .default_value("count")
                .help("Family weighting in the gene score: count or uniform"),
        )
        .arg(
            Arg::new("min_codons")
                .short('n')
                .long("min-codons")
                .value_parser(value_parser!(usize))
                .value_name("INT")
                .help(format!(
                    "Flag genes with fewer codons as low confidence [default: {DEFAULT_MIN_CODON_COUNT}]"
                )),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_parser(value_parser!(NonZeroUsize))
                .value_name("INT")
                .help("Set number of threads [default: available cores]"),
        )
        .arg(
            Arg::new("loglevel")
                .short('l')
                .long("loglevel")
                .value_name("LOGLEVEL")
                .value_parser(value_parser!(LogLevel))
                .ignore_case(true)
                .default_value("warn")
                .help("Set log level"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .long("quiet")
                .conflicts_with("loglevel")
                .help("Silence all log output"),
        )
}

/// Parse the command line and initialize logging
pub fn handle_cli() -> Result<CliOptions, Box<dyn std::error::Error>> {
    let m = cli_model().get_matches();
    init_log(&m)?;
    Ok(options_from_matches(&m))
}

fn options_from_matches(m: &ArgMatches) -> CliOptions {
    let defaults = DcbConfig::default();
    let config = DcbConfig {
        min_codon_count: m
            .get_one::<usize>("min_codons")
            .copied()
            .unwrap_or(defaults.min_codon_count),
        deviation_metric: m
            .get_one::<DeviationMetric>("metric")
            .copied()
            .unwrap_or(defaults.deviation_metric),
        family_weighting: m
            .get_one::<FamilyWeighting>("weighting")
            .copied()
            .unwrap_or(defaults.family_weighting),
        num_threads: m.get_one::<NonZeroUsize>("threads").map(|n| n.get()),
        output_format: m
            .get_one::<OutputFormat>("format")
            .copied()
            .unwrap_or(defaults.output_format),
    };

    CliOptions {
        input: m.get_one::<PathBuf>("input").cloned(),
        output: m.get_one::<PathBuf>("output").cloned(),
        config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        let m = cli_model()
            .try_get_matches_from(std::iter::once("dcb").chain(args.iter().copied()))
            .unwrap();
        options_from_matches(&m)
    }

    #[test]
    fn test_cli_model_is_consistent() {
        cli_model().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]);
        assert!(options.input.is_none());
        assert!(options.output.is_none());
        assert_eq!(options.config.min_codon_count, DEFAULT_MIN_CODON_COUNT);
        assert_eq!(options.config.deviation_metric, DeviationMetric::Absolute);
        assert_eq!(options.config.family_weighting, FamilyWeighting::CodonCount);
        assert_eq!(options.config.output_format, OutputFormat::Tsv);
        assert!(options.config.num_threads.is_none());
    }

    #[test]
    fn test_all_options() {
        let options = parse(&[
            "-i", "genes.fna", "-o", "out.json", "-f", "json", "-d", "squared", "-w", "uniform",
            "-n", "50", "-t", "4",
        ]);
        assert_eq!(options.input, Some(PathBuf::from("genes.fna")));
        assert_eq!(options.output, Some(PathBuf::from("out.json")));
        assert_eq!(options.config.output_format, OutputFormat::Json);
        assert_eq!(options.config.deviation_metric, DeviationMetric::Squared);
        assert_eq!(options.config.family_weighting, FamilyWeighting::Uniform);
        assert_eq!(options.config.min_codon_count, 50);
        assert_eq!(options.config.num_threads, Some(4));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for args in [
            ["-f", "gff"],
            ["-d", "cosine"],
            ["-w", "length"],
            ["-t", "0"],
            ["-n", "many"],
        ] {
            let result =
                cli_model().try_get_matches_from(std::iter::once("dcb").chain(args.iter().copied()));
            assert!(result.is_err(), "{:?} should be rejected", args);
        }
    }

    #[test]
    fn test_quiet_conflicts_with_explicit_loglevel() {
        let result = cli_model().try_get_matches_from(["dcb", "-q", "-l", "info"]);
        assert!(result.is_err());
        assert!(cli_model().try_get_matches_from(["dcb", "-q"]).is_ok());
    }
}
