//! Colored terminal rendering for run reports.

use owo_colors::OwoColorize;
use trellocal_core::{ActionKind, Outcome, RunReport, TaskOutcome};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ActionKind {
    fn render(&self) -> String {
        let symbol = self.to_string();
        match self {
            ActionKind::Create => symbol.green().to_string(),
            ActionKind::Update => symbol.yellow().to_string(),
            ActionKind::Pass => symbol.dimmed().to_string(),
        }
    }
}

impl Render for TaskOutcome {
    fn render(&self) -> String {
        let due = self
            .due
            .map(|d| d.format("%Y-%m-%d").dimmed().to_string())
            .unwrap_or_default();

        let (symbol, name, detail) = match &self.outcome {
            Outcome::Created(id) => (
                ActionKind::Create.render(),
                self.task_name.green().to_string(),
                id.dimmed().to_string(),
            ),
            Outcome::Updated(id) => (
                ActionKind::Update.render(),
                self.task_name.yellow().to_string(),
                id.dimmed().to_string(),
            ),
            Outcome::Unchanged => (
                ActionKind::Pass.render(),
                self.task_name.clone(),
                String::new(),
            ),
            Outcome::Planned(kind) => {
                let name = match kind {
                    ActionKind::Create => self.task_name.green().to_string(),
                    ActionKind::Update => self.task_name.yellow().to_string(),
                    ActionKind::Pass => self.task_name.clone(),
                };
                (kind.render(), name, String::new())
            }
            Outcome::Skipped(reason) => (
                "-".dimmed().to_string(),
                self.task_name.dimmed().to_string(),
                format!("({reason})").dimmed().to_string(),
            ),
            Outcome::Failed(error) => (
                "!".red().to_string(),
                self.task_name.red().to_string(),
                error.red().to_string(),
            ),
        };

        [symbol, name, due, detail]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Render for RunReport {
    fn render(&self) -> String {
        let mut parts = vec![
            format!("{} created", self.created()),
            format!("{} updated", self.updated()),
            format!("{} unchanged", self.unchanged()),
            format!("{} skipped", self.skipped()),
        ];
        if self.failed() > 0 {
            parts.push(format!("{} failed", self.failed()).red().to_string());
        }
        parts.join(", ")
    }
}
