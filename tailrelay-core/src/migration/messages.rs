use crate::migration::types::MigrationStatus;
use owo_colors::OwoColorize;

pub fn colored_status(status: MigrationStatus) -> String {
    let text = status.as_str();
    match status {
        MigrationStatus::Running => text.yellow().to_string(),
        MigrationStatus::PreflightSuccess | MigrationStatus::Done => text.green().to_string(),
        MigrationStatus::PreflightError | MigrationStatus::Aborted | MigrationStatus::Error => {
            text.red().to_string()
        }
        _ => text.blue().to_string(),
    }
}

pub fn hint_for(status: MigrationStatus) -> &'static str {
    match status {
        MigrationStatus::Aborted => {
            "The migration has been aborted. No update will be posted here."
        }
        MigrationStatus::Created => {
            "The migration has been created. The preflight checks will begin shortly."
        }
        MigrationStatus::PreflightError => {
            "There was an error during the preflight checks. No update will be posted here."
        }
        MigrationStatus::PreflightSuccess => {
            "The preflight checks were successful. Waiting on the user to start the 'prepare' step."
        }
        MigrationStatus::Running => "The migration is currently running.",
        MigrationStatus::Prepared => {
            "The migration has been prepared. Waiting on the user to start the 'data' or 'finalize' step."
        }
        MigrationStatus::DataMigrated => {
            "The addon has been migrated. Waiting on the user to start the 'finalize' step."
        }
        MigrationStatus::Error => {
            "There was an error while running the migration. Waiting on the user to 'abort' it."
        }
        MigrationStatus::Done => "The migration is done. No update will be posted here.",
        MigrationStatus::Aborting => {
            "The migration will be aborted shortly. The abort process will begin shortly."
        }
        MigrationStatus::Unknown => "",
    }
}

/// Closing line printed once watching has stopped, if the status calls for one.
pub fn finished_message(status: MigrationStatus) -> Option<&'static str> {
    let message = match status {
        MigrationStatus::Done => "Your application has been migrated to its new region.",
        MigrationStatus::Error | MigrationStatus::PreflightError => {
            "The migration failed. Abort it before trying again."
        }
        MigrationStatus::PreflightSuccess => {
            "The preflight checks succeeded. You can now run the 'prepare' step."
        }
        MigrationStatus::Prepared => {
            "The new application is prepared. You can now run the 'data' or 'finalize' step."
        }
        MigrationStatus::DataMigrated => {
            "The data has been migrated. You can now run the 'finalize' step."
        }
        MigrationStatus::Aborted => "The migration has been aborted.",
        _ => return None,
    };
    Some(message)
}
