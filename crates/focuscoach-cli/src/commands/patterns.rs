//! Pattern score commands.

use std::path::PathBuf;

use clap::Subcommand;
use focuscoach_core::PatternMap;

use super::{CliResult, Session};

#[derive(Subcommand)]
pub enum PatternsAction {
    /// Show the six pattern scores
    Show,
    /// Export pattern scores as JSON
    Export {
        /// Output file (default: stdout)
        file: Option<PathBuf>,
    },
    /// Import pattern scores from a JSON file
    Import {
        /// JSON object mapping pattern names to scores
        file: PathBuf,
    },
    /// Reset all pattern scores to zero
    Reset,
}

pub fn run(action: PatternsAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        PatternsAction::Show => {
            for (kind, score) in session.detector.pattern_scores().iter() {
                println!("{:<28} {score:.2}", kind.key());
            }
        }
        PatternsAction::Export { file } => {
            let json = serde_json::to_string_pretty(&session.detector.export_patterns())?;
            match file {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Patterns exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        PatternsAction::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let map: PatternMap = serde_json::from_str(&content)?;
            let report = session.detector.import_patterns(&map);
            session.save()?;
            println!("Imported {} pattern scores", report.applied);
            if !report.unknown_keys.is_empty() {
                println!("Ignored unknown keys: {}", report.unknown_keys.join(", "));
            }
        }
        PatternsAction::Reset => {
            session.detector.reset_patterns();
            session.save()?;
            println!("pattern scores reset");
        }
    }
    Ok(())
}
