//! Tail protocol envelopes.
//!
//! Every inbound message is `{"type": "...", "id": "...", "data": {...}}`.
//! The discriminator is decoded first and `data` is then decoded into the
//! payload for that variant, so a malformed payload only fails its own event.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum TailEvent {
    Ping,
    Log(LogData),
    Status(StatusData),
    New(NewDeployment),
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogData {
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Deployment the line belongs to, set by the deployments stream.
    #[serde(skip)]
    pub deployment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusData {
    #[serde(alias = "Status")]
    pub status: String,
    #[serde(skip)]
    pub deployment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewDeployment {
    pub deployment: DeploymentSummary,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeploymentSummary {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "user")]
    pub pusher: Option<Pusher>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pusher {
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("malformed '{kind}' payload: {source}")]
    Payload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{kind}' event has no payload")]
    MissingPayload { kind: String },
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type", alias = "event")]
    kind: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    data: Option<Value>,

    // Legacy log frames carry the line at the top level.
    #[serde(default)]
    log: Option<String>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

pub fn decode(text: &str) -> Result<TailEvent, DecodeError> {
    let raw: RawEnvelope = serde_json::from_str(text).map_err(DecodeError::Envelope)?;

    match raw.kind.as_str() {
        "ping" => Ok(TailEvent::Ping),
        "log" => {
            if raw.data.is_none() {
                if let Some(content) = raw.log {
                    return Ok(TailEvent::Log(LogData {
                        content,
                        timestamp: raw.timestamp,
                        deployment_id: raw.id,
                    }));
                }
            }
            let mut data: LogData = payload(&raw.kind, raw.data)?;
            data.deployment_id = raw.id;
            Ok(TailEvent::Log(data))
        }
        "status" => {
            let mut data: StatusData = payload(&raw.kind, raw.data)?;
            data.deployment_id = raw.id;
            Ok(TailEvent::Status(data))
        }
        "new" => Ok(TailEvent::New(payload(&raw.kind, raw.data)?)),
        _ => Ok(TailEvent::Unknown(raw.kind)),
    }
}

fn payload<T>(kind: &str, data: Option<Value>) -> Result<T, DecodeError>
where
    T: for<'de> Deserialize<'de>,
{
    let data = data.ok_or_else(|| DecodeError::MissingPayload {
        kind: kind.to_string(),
    })?;

    serde_json::from_value(data).map_err(|source| DecodeError::Payload {
        kind: kind.to_string(),
        source,
    })
}
