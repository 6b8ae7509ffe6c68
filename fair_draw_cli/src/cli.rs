use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::digest::DigestAlgorithm;

#[derive(Parser, Debug)]
#[command(name = "fair-draw")]
#[command(version, about = "Reproducible, publicly verifiable lottery draws")]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON config file
    #[arg(long, global = true, env = "FAIR_DRAW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate random commitment text and print its digest
    Commit {
        /// Number of characters (default from config: 64)
        #[arg(short, long)]
        length: Option<usize>,

        /// Digest algorithm (default from config: md5)
        #[arg(long, value_enum)]
        digest: Option<DigestAlgorithm>,
    },

    /// Draw ranks from a text label and parameters
    Draw(DrawArgs),

    /// Check text against a published digest
    Verify {
        /// The revealed text
        #[arg(long, allow_hyphen_values = true)]
        text: String,

        /// The published hex digest
        #[arg(long)]
        hash: String,

        /// Digest algorithm (default from config: md5)
        #[arg(long, value_enum)]
        digest: Option<DigestAlgorithm>,
    },

    /// Print the first N primes
    Primes {
        count: usize,
    },
}

#[derive(Args, Debug, Default)]
pub struct DrawArgs {
    /// Text label (outer whitespace ignored)
    #[arg(long, allow_hyphen_values = true, required_unless_present = "request")]
    pub text: Option<String>,

    /// Whitespace-separated non-negative integers; may be repeated
    #[arg(long, allow_hyphen_values = true)]
    pub params: Vec<String>,

    /// Largest rank
    #[arg(long, required_unless_present = "request")]
    pub total: Option<u64>,

    /// Which stream iterations to report (default from config: 100).
    /// Cost is linear in the largest index: each unit is one xorshift round,
    /// so indices in the billions take seconds and far larger ones will not
    /// finish
    #[arg(long, allow_hyphen_values = true)]
    pub steps: Vec<String>,

    /// Read the whole request from a JSON file
    #[arg(long, conflicts_with_all = ["text", "params", "total", "steps"])]
    pub request: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_draw() {
        let cli = Cli::try_parse_from([
            "fair-draw", "draw", "--text", "prize", "--params", "1 2", "--params", "3",
            "--total", "10", "--steps", "-1 5",
        ])
        .unwrap();
        let Commands::Draw(args) = cli.command else {
            panic!("expected draw");
        };
        assert_eq!(args.text.as_deref(), Some("prize"));
        assert_eq!(args.params, vec!["1 2", "3"]);
        assert_eq!(args.total, Some(10));
        assert_eq!(args.steps, vec!["-1 5"]);
        assert!(!args.json);
    }

    #[test]
    fn draw_needs_text_and_total_or_request() {
        assert!(Cli::try_parse_from(["fair-draw", "draw", "--text", "x"]).is_err());
        assert!(Cli::try_parse_from(["fair-draw", "draw", "--request", "r.json"]).is_ok());
        assert!(
            Cli::try_parse_from(["fair-draw", "draw", "--request", "r.json", "--total", "3"])
                .is_err()
        );
    }

    #[test]
    fn parses_commit_and_verify() {
        let cli = Cli::try_parse_from(["fair-draw", "commit", "-l", "16", "--digest", "sha256"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Commit { length: Some(16), digest: Some(DigestAlgorithm::Sha256) }
        ));

        let cli =
            Cli::try_parse_from(["fair-draw", "-v", "verify", "--text", "t", "--hash", "ab"])
                .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Verify { digest: None, .. }));
    }

    #[test]
    fn steps_help_mentions_linear_cost() {
        let mut cmd = Cli::command();
        let help = cmd
            .find_subcommand_mut("draw")
            .unwrap()
            .render_help()
            .to_string();
        assert!(help.contains("linear in the largest index"), "{help}");
    }
}
