use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Insert,
    Update,
    Delete,
}

/// A row-level change delivered over the realtime socket.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub action: ChangeAction,
    pub table: String,
    pub payload: serde_json::Value,
}

/// Narrows a realtime channel to one table and one `eq` column match,
/// mirroring the REST filter syntax.
#[derive(Debug, Clone)]
pub struct ChannelFilter {
    table: String,
    column: String,
    value: String,
}

impl ChannelFilter {
    pub fn eq(table: &str, column: &str, value: impl Display) -> Self {
        ChannelFilter {
            table: table.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn topic(&self) -> String {
        format!("{}:{}=eq.{}", self.table, self.column, self.value)
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientFrame {
    Subscribe { topic: String },
    Unsubscribe { topic: String },
    Heartbeat,
}

#[derive(Debug, Deserialize)]
pub struct ServerFrame {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl ServerFrame {
    /// Maps a raw frame to a change event; frames with non-change events
    /// (acks, presence) yield `None`.
    pub fn change(&self) -> Option<ChangeEvent> {
        let action = match self.event.as_str() {
            "INSERT" => ChangeAction::Insert,
            "UPDATE" => ChangeAction::Update,
            "DELETE" => ChangeAction::Delete,
            _ => return None,
        };
        let table = self.topic.split(':').next().unwrap_or_default().to_string();
        Some(ChangeEvent {
            action,
            table,
            payload: self.payload.clone(),
        })
    }
}
