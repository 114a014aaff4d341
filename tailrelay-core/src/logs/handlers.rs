use crate::logs::envelope::{DeploymentSummary, LogData, StatusData, TailEvent};
use crate::logs::error::StreamError;
use crate::logs::render::LineRenderer;
use crate::logs::tail::{EventHandler, Flow};
use std::collections::HashMap;

/// Application log tail: every `log` event becomes highlighted output.
pub struct LogLinesHandler {
    renderer: LineRenderer,
}

impl LogLinesHandler {
    pub fn new(renderer: LineRenderer) -> Self {
        Self { renderer }
    }
}

impl EventHandler for LogLinesHandler {
    fn on_event(&mut self, event: TailEvent) -> Result<Flow, StreamError> {
        if let TailEvent::Log(data) = event {
            self.renderer.render_line(data.content.trim())?;
        }
        Ok(Flow::Continue)
    }

    fn on_close(&mut self) -> Result<(), StreamError> {
        self.renderer.flush()
    }
}

/// Deployment progress stream.
///
/// Follows every deployment of the application, or a single one when
/// `deployment_id` is set, in which case the session ends with that
/// deployment's final status.
pub struct DeploymentFollowHandler {
    renderer: LineRenderer,
    deployment_id: Option<String>,
    statuses: HashMap<String, String>,
}

const IN_PROGRESS_STATUSES: [&str; 3] = ["building", "starting", "pushing"];
const SUCCESS_STATUS: &str = "success";

pub fn is_finished_status(status: &str) -> bool {
    !IN_PROGRESS_STATUSES.contains(&status)
}

impl DeploymentFollowHandler {
    pub fn new(renderer: LineRenderer, deployment_id: Option<String>) -> Self {
        Self {
            renderer,
            deployment_id,
            statuses: HashMap::new(),
        }
    }

    fn is_followed(&self, id: Option<&str>) -> bool {
        match &self.deployment_id {
            None => true,
            Some(wanted) => id == Some(wanted.as_str()),
        }
    }

    fn on_log(&mut self, data: LogData) -> Result<Flow, StreamError> {
        if self.is_followed(data.deployment_id.as_deref()) {
            self.renderer
                .write_plain(&format!("[LOG] {}", data.content.trim()))?;
        }
        Ok(Flow::Continue)
    }

    fn on_status(&mut self, data: StatusData) -> Result<Flow, StreamError> {
        if !self.is_followed(data.deployment_id.as_deref()) {
            return Ok(Flow::Continue);
        }

        let key = data.deployment_id.clone().unwrap_or_default();
        let line = match self.statuses.get(&key) {
            Some(previous) => format!("[STATUS] New status: {previous} → {}", data.status),
            None => format!("[STATUS] New status: {}", data.status),
        };
        self.renderer.write_plain(&line)?;
        self.statuses.insert(key.clone(), data.status.clone());

        match &self.deployment_id {
            Some(_) if is_finished_status(&data.status) => {
                if data.status == SUCCESS_STATUS {
                    Ok(Flow::Finish)
                } else {
                    Err(StreamError::DeploymentFailed {
                        id: key,
                        status: data.status,
                    })
                }
            }
            _ => Ok(Flow::Continue),
        }
    }

    fn on_new(&mut self, deployment: DeploymentSummary) -> Result<Flow, StreamError> {
        if self.is_followed(Some(&deployment.id)) {
            let pusher = deployment
                .pusher
                .as_ref()
                .map(|p| p.username.as_str())
                .unwrap_or("unknown");
            self.renderer
                .write_plain(&format!("[NEW] New deploy: {} from {}", deployment.id, pusher))?;
        }
        Ok(Flow::Continue)
    }
}

impl EventHandler for DeploymentFollowHandler {
    fn on_event(&mut self, event: TailEvent) -> Result<Flow, StreamError> {
        match event {
            TailEvent::Log(data) => self.on_log(data),
            TailEvent::Status(data) => self.on_status(data),
            TailEvent::New(new) => self.on_new(new.deployment),
            TailEvent::Ping | TailEvent::Unknown(_) => Ok(Flow::Continue),
        }
    }

    fn on_close(&mut self) -> Result<(), StreamError> {
        self.renderer.flush()
    }
}
