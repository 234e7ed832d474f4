use clap::Parser;

use super::*;
use crate::report::ReportFormat;

fn parse_get(extra: &[&str]) -> ReportArgs {
    let mut argv = vec![
        "gafeed-cli",
        "get",
        "--start-date",
        "2010-01-01",
        "--end-date",
        "2010-01-31",
    ];
    argv.extend_from_slice(extra);
    let cli = Cli::try_parse_from(argv).expect("expected valid cli args");
    match cli.command {
        Commands::Get(args) => args,
        other => panic!("expected get, got {other:?}"),
    }
}

#[test]
fn parses_accounts_with_default_format() {
    let cli = Cli::try_parse_from(["gafeed-cli", "accounts"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Accounts {
            format: ListFormat::Yaml
        }
    ));
}

#[test]
fn parses_segments_as_json() {
    let cli = Cli::try_parse_from(["gafeed-cli", "segments", "--format", "json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Segments {
            format: ListFormat::Json
        }
    ));
}

#[test]
fn get_requires_dates() {
    assert!(Cli::try_parse_from(["gafeed-cli", "get", "--end-date", "2010-01-31"]).is_err());
    assert!(Cli::try_parse_from(["gafeed-cli", "get", "--start-date", "2010-01-01"]).is_err());
}

#[test]
fn get_defaults_to_short_csv() {
    let args = parse_get(&[]);
    assert_eq!(args.format, ReportFormat::Csv);
    assert!(args.dimensions.is_empty());
    assert!(args.profile_id.is_none());
}

#[test]
fn get_splits_comma_lists_and_repeats_filters() {
    let args = parse_get(&[
        "--dimensions",
        "browser,country",
        "--metrics",
        "visits",
        "--sort",
        "-visits,browser",
        "--filter",
        "browser==Firefox",
        "--filter",
        "visits>5",
        "--format",
        "csv-long",
    ]);
    assert_eq!(args.dimensions, vec!["browser", "country"]);
    assert_eq!(args.metrics, vec!["visits"]);
    assert_eq!(args.sort, vec!["-visits", "browser"]);
    assert_eq!(args.filters, vec!["browser==Firefox", "visits>5"]);
    assert_eq!(args.format, ReportFormat::CsvLong);
}

#[test]
fn get_maps_onto_query_args() {
    let args = parse_get(&[
        "--metrics",
        "pageviews",
        "--segment",
        "gaid::-2",
        "--start-index",
        "11",
        "--max-results",
        "10",
        "--profile-id",
        "123",
    ]);
    assert_eq!(args.profile_id, Some(123));

    let query = args.to_query();
    assert_eq!(query.start_date.as_deref(), Some("2010-01-01"));
    assert_eq!(query.end_date.as_deref(), Some("2010-01-31"));
    assert_eq!(query.metrics, vec!["pageviews"]);
    assert_eq!(query.segment.as_deref(), Some("gaid::-2"));
    assert_eq!(query.start_index, Some(11));
    assert_eq!(query.max_results, Some(10));
}

#[test]
fn unknown_format_is_rejected() {
    assert!(Cli::try_parse_from([
        "gafeed-cli",
        "get",
        "--start-date",
        "2010-01-01",
        "--end-date",
        "2010-01-31",
        "--format",
        "xml",
    ])
    .is_err());
}
