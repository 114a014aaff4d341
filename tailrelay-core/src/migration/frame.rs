use crate::migration::messages::{colored_status, hint_for};
use crate::migration::types::{MigrationStatus, RegionMigration, Step, StepStatus};
use owo_colors::OwoColorize;
use std::fmt::Write as _;
use std::io::{self, Write};

pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const SUCCESS_MARK: &str = "✔";
const ERROR_MARK: &str = "✘";

/// Fetch failures being retried, shown above the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBanner {
    pub attempt: u32,
    pub max: u32,
}

/// What the summary shows, independent of the data.
#[derive(Debug, Clone, Default)]
pub struct FrameView {
    pub show_hints: bool,
    pub hidden_steps: Vec<String>,
}

impl FrameView {
    pub fn render(
        &self,
        migration: Option<&RegionMigration>,
        retry: Option<RetryBanner>,
        spinner: &str,
    ) -> String {
        let mut out = String::new();

        if let Some(retry) = retry {
            let line = format!("Connection lost. Retrying ({}/{})", retry.attempt, retry.max);
            let _ = writeln!(out, "{}", line.red());
        }

        let Some(migration) = migration else {
            let line = format!("{spinner} Loading migration information");
            let _ = writeln!(out, "{}", line.blue());
            return out;
        };

        let _ = writeln!(out, "Migration ID: {}", migration.id);
        let _ = writeln!(out, "Migrating app: {}", migration.src_app_name);
        let _ = writeln!(out, "Destination: {}", migration.destination);
        if migration.new_app_id.is_empty() {
            let _ = writeln!(out, "New app ID: {}", "N/A".blue());
        } else {
            let _ = writeln!(out, "New app ID: {}", migration.new_app_id);
        }
        let _ = writeln!(out, "Status: {}", colored_status(migration.status));

        if self.show_hints {
            let _ = writeln!(out, "{}", hint_for(migration.status));
        }
        if migration.status == MigrationStatus::Created {
            let _ = writeln!(out, "{spinner} Waiting for the migration to start");
        }

        for step in migration.steps.iter().filter(|s| self.is_visible(s)) {
            if let Some(line) = step_line(step, spinner) {
                let _ = writeln!(out, "{line}");
            }
        }

        out
    }

    fn is_visible(&self, step: &Step) -> bool {
        !self.hidden_steps.iter().any(|id| *id == step.id)
    }
}

fn step_line(step: &Step, spinner: &str) -> Option<String> {
    let line = match step.status {
        StepStatus::Running => format!("{spinner} {}...", step.name).blue().to_string(),
        StepStatus::Done => format!("{SUCCESS_MARK} {} Done!", step.name)
            .green()
            .to_string(),
        StepStatus::Error => format!("{ERROR_MARK} {} FAILED!", step.name)
            .red()
            .to_string(),
        StepStatus::Unknown => return None,
    };
    Some(line)
}

/// Redraws a multi-line frame in place.
///
/// Each paint moves the cursor back to the first line of the previous frame
/// and clears to the end of the screen before writing the new one.
pub struct FrameWriter {
    out: Box<dyn Write + Send>,
    previous_lines: usize,
}

impl FrameWriter {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out,
            previous_lines: 0,
        }
    }

    pub fn paint(&mut self, frame: &str) -> io::Result<()> {
        if self.previous_lines > 0 {
            write!(self.out, "\x1b[{}F\x1b[J", self.previous_lines)?;
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        self.previous_lines = frame.matches('\n').count();
        Ok(())
    }
}
