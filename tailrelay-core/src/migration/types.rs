use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationStatus {
    Created,
    PreflightSuccess,
    PreflightError,
    Running,
    Prepared,
    DataMigrated,
    Aborting,
    Aborted,
    Error,
    Done,
    #[serde(other)]
    Unknown,
}

impl MigrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MigrationStatus::Created => "created",
            MigrationStatus::PreflightSuccess => "preflight-success",
            MigrationStatus::PreflightError => "preflight-error",
            MigrationStatus::Running => "running",
            MigrationStatus::Prepared => "prepared",
            MigrationStatus::DataMigrated => "data-migrated",
            MigrationStatus::Aborting => "aborting",
            MigrationStatus::Aborted => "aborted",
            MigrationStatus::Error => "error",
            MigrationStatus::Done => "done",
            MigrationStatus::Unknown => "unknown",
        }
    }

    /// No further progress will be reported once one of these is reached.
    pub fn is_terminal(self) -> bool {
        matches!(self, MigrationStatus::Done | MigrationStatus::Error)
    }

    /// Statuses that end a watch when the caller did not name any of its own.
    pub fn is_settled(self) -> bool {
        self.is_terminal()
            || matches!(self, MigrationStatus::Aborted | MigrationStatus::PreflightError)
    }
}

impl std::str::FromStr for MigrationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s {
            "created" => Self::Created,
            "preflight-success" => Self::PreflightSuccess,
            "preflight-error" => Self::PreflightError,
            "running" => Self::Running,
            "prepared" => Self::Prepared,
            "data-migrated" => Self::DataMigrated,
            "aborting" => Self::Aborting,
            "aborted" => Self::Aborted,
            "error" => Self::Error,
            "done" => Self::Done,
            _ => return Err(anyhow::anyhow!("invalid migration status: {}", s)),
        };
        Ok(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Running,
    Done,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub name: String,
    pub status: StepStatus,
}

/// Remote view of one region migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMigration {
    pub id: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub src_app_name: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub new_app_id: String,
    pub status: MigrationStatus,
    #[serde(default)]
    pub steps: Vec<Step>,
}
