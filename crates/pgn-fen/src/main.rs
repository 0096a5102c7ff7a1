//! pgn-fen - prints the tag pairs and final position of a PGN game.

use anyhow::Context;
use clap::Parser;
use pgn_replay::tags::tag_value;
use pgn_replay::{final_position_with, ReplayConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;

const MISSING: &str = "NOT GIVEN";

/// Tags printed in this order, before the final position.
const TAGS: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

/// Replays a PGN game and prints the final position as FEN.
#[derive(Parser)]
#[command(name = "pgn-fen")]
#[command(about = "Replays a PGN game and prints the final position as FEN")]
struct Args {
    /// PGN file holding a single game
    path: PathBuf,

    /// TOML file with replay settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop with an error after this many half-moves
    #[arg(long)]
    max_plies: Option<usize>,

    /// Print a JSON object instead of text
    #[arg(long)]
    json: bool,

    /// Log each half-move to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Report {
    event: String,
    site: String,
    date: String,
    round: String,
    white: String,
    black: String,
    result: String,
    fen: String,
}

impl Report {
    fn build(pgn: &str, config: ReplayConfig) -> anyhow::Result<Self> {
        let fen = final_position_with(pgn, config).context("replay failed")?;
        let tag = |name: &str| tag_value(pgn, name).unwrap_or_else(|| MISSING.to_string());
        Ok(Report {
            event: tag("Event"),
            site: tag("Site"),
            date: tag("Date"),
            round: tag("Round"),
            white: tag("White"),
            black: tag("Black"),
            result: tag("Result"),
            fen,
        })
    }

    fn to_text(&self) -> String {
        let values = [
            &self.event,
            &self.site,
            &self.date,
            &self.round,
            &self.white,
            &self.black,
            &self.result,
        ];
        let mut out = String::new();
        for (name, value) in TAGS.iter().zip(values) {
            out.push_str(&format!("{}: {}\n", name, value));
        }
        out.push_str(&format!("Final Position: {}\n", self.fen));
        out
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => ReplayConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ReplayConfig::default(),
    };
    if args.max_plies.is_some() {
        config.max_plies = args.max_plies;
    }

    let pgn = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    tracing::debug!(path = %args.path.display(), ?config, "replaying");

    let report = Report::build(&pgn, config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME: &str = r#"[Event "Casual Game"]
[White "Alice"]
[Result "*"]

1. e4 e5 2. Nf3 Nc6 3. Bb5 *
"#;

    #[test]
    fn text_report_fills_missing_tags() {
        let report = Report::build(GAME, ReplayConfig::default()).unwrap();
        assert_eq!(
            report.to_text(),
            "Event: Casual Game\n\
             Site: NOT GIVEN\n\
             Date: NOT GIVEN\n\
             Round: NOT GIVEN\n\
             White: Alice\n\
             Black: NOT GIVEN\n\
             Result: *\n\
             Final Position: r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3\n"
        );
    }

    #[test]
    fn json_report() {
        let report = Report::build(GAME, ReplayConfig::default()).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["white"], "Alice");
        assert_eq!(value["site"], MISSING);
        assert_eq!(
            value["fen"],
            "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3"
        );
    }

    #[test]
    fn replay_errors_propagate() {
        let config = ReplayConfig {
            max_plies: Some(3),
            ..ReplayConfig::default()
        };
        let err = Report::build(GAME, config).unwrap_err();
        assert!(format!("{:#}", err).contains("replay failed"));
    }

    #[test]
    fn cli_parses_flags() {
        let args = Args::parse_from(["pgn-fen", "game.pgn", "--max-plies", "10", "--json", "-vv"]);
        assert_eq!(args.path, PathBuf::from("game.pgn"));
        assert_eq!(args.max_plies, Some(10));
        assert!(args.json);
        assert_eq!(args.verbose, 2);
        assert!(args.config.is_none());
    }
}
