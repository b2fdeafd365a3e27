//! Task snapshot commands.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use focuscoach_core::{EnergyLevel, Priority, TaskSnapshot};

use super::{CliResult, Session};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Record a snapshot of a task
    Record {
        /// Task ID
        #[arg(long)]
        id: String,
        /// Task title
        #[arg(long)]
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Priority: low, medium, high, urgent
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Hard deadline (RFC 3339)
        #[arg(long)]
        deadline: Option<DateTime<Utc>>,
        /// Due date (RFC 3339)
        #[arg(long)]
        due: Option<DateTime<Utc>>,
        /// Estimated duration in minutes
        #[arg(long)]
        estimate: Option<u32>,
        /// Progress percentage (0-100)
        #[arg(long, default_value_t = 0.0)]
        progress: f64,
        /// Difficulty (1-10)
        #[arg(long)]
        difficulty: Option<u8>,
        /// Energy required: very_low, low, medium, high, very_high
        #[arg(long)]
        energy: Option<EnergyLevel>,
        /// Mark as completed
        #[arg(long)]
        completed: bool,
    },
    /// List recorded task snapshots, oldest first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        TaskAction::Record {
            id,
            title,
            description,
            priority,
            deadline,
            due,
            estimate,
            progress,
            difficulty,
            energy,
            completed,
        } => {
            let mut task = TaskSnapshot::new(id, title)
                .priority(priority)
                .progress(progress)
                .completed(completed);
            if let Some(description) = description {
                task = task.description(description);
            }
            if let Some(deadline) = deadline {
                task = task.deadline(deadline);
            }
            if let Some(due) = due {
                task = task.due(due);
            }
            if let Some(minutes) = estimate {
                task = task.estimate(minutes);
            }
            if let Some(level) = difficulty {
                task = task.difficulty(level);
            }
            if let Some(energy) = energy {
                task = task.energy(energy);
            }

            let id = task.id.clone();
            session.detector.record_task(task);
            session.save()?;
            println!("Task recorded: {id}");
        }
        TaskAction::List { json } => {
            let tasks = session.detector.task_history();
            if json {
                println!("{}", serde_json::to_string_pretty(tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks recorded");
            } else {
                for task in tasks {
                    let deadline = task
                        .deadline
                        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<12} {:>5.1}%  {:<6} {:<16} {}",
                        task.id,
                        task.progress_percent,
                        task.priority.as_str(),
                        deadline,
                        task.title
                    );
                }
            }
        }
    }
    Ok(())
}
