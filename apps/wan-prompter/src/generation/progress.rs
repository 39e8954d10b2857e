//! Progress notifications towards the host UI. Best-effort: failures are the
//! caller's to log, never to propagate.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::generation::validation::ValidationReport;
use crate::models::request::{CinematicStyle, WanModel};

/// Event name the host UI listens on for structured updates.
pub const UPDATE_EVENT: &str = "wan_expert_update";

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("no progress subscribers")]
    NoSubscribers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertUpdate {
    pub node_id: String,
    pub word_count: usize,
    pub nsfw_mode: bool,
    pub style: CinematicStyle,
    pub model: WanModel,
    pub validation: ValidationReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ProgressEvent {
    #[serde(rename = "progress_text")]
    Text { node_id: String, text: String },
    #[serde(rename = "wan_expert_update")]
    Update(ExpertUpdate),
}

pub trait ProgressSink: Send + Sync {
    fn send_progress_text(&self, node_id: &str, text: &str) -> Result<(), ProgressError>;
    fn send_update(&self, update: ExpertUpdate) -> Result<(), ProgressError>;
}

/// Drops every notification.
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn send_progress_text(&self, _node_id: &str, _text: &str) -> Result<(), ProgressError> {
        Ok(())
    }

    fn send_update(&self, _update: ExpertUpdate) -> Result<(), ProgressError> {
        Ok(())
    }
}

/// Fans notifications out on a tokio broadcast channel a UI bridge can subscribe to.
#[derive(Clone)]
pub struct BroadcastProgress {
    tx: broadcast::Sender<ProgressEvent>,
}

impl BroadcastProgress {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.tx.subscribe()
    }

    fn publish(&self, event: ProgressEvent) -> Result<(), ProgressError> {
        self.tx
            .send(event)
            .map(|_| ())
            .map_err(|_| ProgressError::NoSubscribers)
    }
}

impl ProgressSink for BroadcastProgress {
    fn send_progress_text(&self, node_id: &str, text: &str) -> Result<(), ProgressError> {
        self.publish(ProgressEvent::Text {
            node_id: node_id.to_string(),
            text: text.to_string(),
        })
    }

    fn send_update(&self, update: ExpertUpdate) -> Result<(), ProgressError> {
        self.publish(ProgressEvent::Update(update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::validation::validate_prompt_structure;

    fn update() -> ExpertUpdate {
        ExpertUpdate {
            node_id: "17".to_string(),
            word_count: 3,
            nsfw_mode: false,
            style: CinematicStyle::Gentle,
            model: WanModel::Ti2v5b,
            validation: validate_prompt_structure("camera pans left"),
        }
    }

    #[test]
    fn test_broadcast_without_subscribers_reports_error() {
        let sink = BroadcastProgress::new(4);
        assert!(matches!(
            sink.send_progress_text("1", "hi"),
            Err(ProgressError::NoSubscribers)
        ));
    }

    #[test]
    fn test_broadcast_delivers_in_order() {
        let sink = BroadcastProgress::new(4);
        let mut rx = sink.subscribe();
        sink.send_progress_text("17", "Generated 3-word WAN 2.2 prompt").unwrap();
        sink.send_update(update()).unwrap();

        assert!(matches!(rx.try_recv().unwrap(), ProgressEvent::Text { .. }));
        assert_eq!(rx.try_recv().unwrap(), ProgressEvent::Update(update()));
    }

    #[test]
    fn test_update_event_payload_shape() {
        let json = serde_json::to_value(ProgressEvent::Update(update())).unwrap();
        assert_eq!(json["event"], UPDATE_EVENT);
        assert_eq!(json["data"]["node_id"], "17");
        assert_eq!(json["data"]["style"], "gentle");
        assert_eq!(json["data"]["model"], "TI2V-5B");
        assert_eq!(json["data"]["validation"]["has_camera_movement"], true);
    }

    #[test]
    fn test_noop_accepts_everything() {
        assert!(NoopProgress.send_update(update()).is_ok());
    }
}
