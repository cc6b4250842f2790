use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

/// Command-line arguments for the zipres tool
#[derive(Debug)]
pub struct Args {
    /// Enable verbose output
    pub verbose: bool,

    /// Path to the manifest file or directory containing it
    pub path: Option<PathBuf>,

    /// Where to move the finished archive
    pub output: Option<PathBuf>,

    /// Write directory entries with a trailing slash
    pub trailing_slash: bool,

    /// Unix time stamped on every entry
    pub source_date_epoch: Option<i64>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    fn from_matches(matches: &clap::ArgMatches) -> Self {
        Self {
            verbose: matches.get_flag("verbose"),
            path: matches.get_one::<String>("path").map(PathBuf::from),
            output: matches.get_one::<String>("output").map(PathBuf::from),
            trailing_slash: matches.get_flag("trailing-slash"),
            source_date_epoch: matches.get_one::<i64>("source-date-epoch").copied(),
        }
    }
}

fn command() -> Command {
    Command::new("zipres")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build a deterministic zip archive from an ordered resource manifest")
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .value_name("PATH")
                .help("Path to resources.toml or directory containing it"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Move the finished archive to FILE instead of leaving it in the temp directory"),
        )
        .arg(
            Arg::new("trailing-slash")
                .long("trailing-slash")
                .action(ArgAction::SetTrue)
                .help("Name directory entries with a trailing '/'"),
        )
        .arg(
            Arg::new("source-date-epoch")
                .long("source-date-epoch")
                .value_name("SECONDS")
                .env("SOURCE_DATE_EPOCH")
                .value_parser(value_parser!(i64))
                .help("Unix timestamp written as the modification time of every entry"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::from_matches(&command().try_get_matches_from(argv).unwrap())
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["zipres"]);
        assert!(!args.verbose);
        assert!(!args.trailing_slash);
        assert!(args.path.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "zipres",
            "-p",
            "app/resources.toml",
            "-o",
            "out.zip",
            "--trailing-slash",
            "--source-date-epoch",
            "1700000000",
            "-v",
        ]);
        assert!(args.verbose);
        assert!(args.trailing_slash);
        assert_eq!(args.path, Some(PathBuf::from("app/resources.toml")));
        assert_eq!(args.output, Some(PathBuf::from("out.zip")));
        assert_eq!(args.source_date_epoch, Some(1_700_000_000));
    }

    #[test]
    fn test_rejects_non_numeric_epoch() {
        assert!(
            command()
                .try_get_matches_from(["zipres", "--source-date-epoch", "soon"])
                .is_err()
        );
    }
}
