//! Risk analysis command.

use clap::Args;
use focuscoach_core::{motivational_quote, EmotionalState, ValidationError};
use serde_json::json;

use super::{CliResult, Session};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Analyze against the latest snapshot of this task
    #[arg(long)]
    task: Option<String>,
    /// Current mood
    #[arg(long)]
    mood: Option<EmotionalState>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: AnalyzeArgs) -> CliResult {
    let session = Session::open()?;
    let detector = &session.detector;

    let task = match args.task.as_deref() {
        Some(id) => Some(
            detector
                .latest_task(id)
                .ok_or_else(|| ValidationError::UnknownTask(id.to_string()))?,
        ),
        None => None,
    };

    let analysis = detector.analyze(task, args.mood);
    let intervention = detector.personalized_intervention(&analysis);

    if args.json {
        let out = json!({
            "analysis": analysis,
            "riskLevel": analysis.risk_level(),
            "intervention": intervention,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "Risk score: {:.2} ({})",
        analysis.risk_score,
        analysis.risk_level().name()
    );
    if analysis.intervention_needed {
        println!("Intervention needed");
    }

    if !analysis.signals.is_empty() {
        println!("\nSignals:");
        for signal in &analysis.signals {
            println!(
                "  [{}] {:.2}  {}",
                signal.severity.as_str(),
                signal.confidence,
                signal.description
            );
        }
    }

    println!("\nRecommendations:");
    for rec in &analysis.recommendations {
        println!("  - {rec}");
    }

    println!("\n{}", intervention.title);
    println!("{}", intervention.message);
    for action in &intervention.actions {
        println!("  * {action}");
    }

    println!("\n\"{}\"", motivational_quote(&mut rand::thread_rng()));
    Ok(())
}
