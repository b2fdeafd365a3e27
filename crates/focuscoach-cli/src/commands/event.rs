//! Behavior event commands.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use focuscoach_core::{BehaviorEvent, EmotionalState, PatternUpdate, UserAction};
use uuid::Uuid;

use super::{CliResult, Session};

#[derive(Subcommand)]
pub enum EventAction {
    /// Record a behavior event
    Record {
        /// Action kind (e.g. task_postponed, TASK_STARTED)
        #[arg(long)]
        action: UserAction,
        /// Mood at the time of the action
        #[arg(long)]
        mood: Option<EmotionalState>,
        /// When it happened (RFC 3339, default: now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// Owning user
        #[arg(long, default_value = "local")]
        user: String,
        /// Free-form JSON context
        #[arg(long)]
        context: Option<String>,
        /// Risk value attached at capture time (0.0-1.0)
        #[arg(long, default_value_t = 0.0)]
        risk: f64,
    },
    /// List recorded behavior events, oldest first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: EventAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        EventAction::Record {
            action,
            mood,
            at,
            user,
            context,
            risk,
        } => {
            let mut event = BehaviorEvent::new(action, at.unwrap_or_else(Utc::now))
                .id(Uuid::new_v4().to_string())
                .user(user)
                .risk(risk);
            if let Some(mood) = mood {
                event = event.mood(mood);
            }
            if let Some(raw) = context {
                event = event.context(serde_json::from_str(&raw)?);
            }

            let id = event.id.clone();
            let update = session.detector.record_behavior(event);
            session.save()?;

            println!("Event recorded: {id}");
            match update {
                PatternUpdate::Applied => println!("Pattern scores updated"),
                PatternUpdate::Stale => {
                    println!("Event is older than the pattern window; scores unchanged")
                }
                PatternUpdate::MalformedTimestamp => {
                    println!("Timestamp could not be parsed; scores unchanged")
                }
            }
        }
        EventAction::List { json } => {
            let events = session.detector.behavior_history();
            if json {
                println!("{}", serde_json::to_string_pretty(events)?);
            } else if events.is_empty() {
                println!("No events recorded");
            } else {
                for event in events {
                    let mood = event
                        .emotional_state
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{}  {:<26} {:<12} {}",
                        event.timestamp,
                        event.action.as_str(),
                        mood,
                        event.id
                    );
                }
            }
        }
    }
    Ok(())
}
