use std::{collections::VecDeque, sync::Arc};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{mpsc, RwLock};
use utoipa::ToSchema;

/// Entries beyond this are dropped from the in-memory tail (oldest first).
const TAIL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub module: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub metadata: Value,
    pub recorded_at: DateTime<Utc>,
}

/// Fire-and-forget activity log. `record` hands the entry to a background
/// task over an unbounded channel and never blocks or fails the calling
/// operation; the task traces each entry and keeps a bounded tail for the
/// activity endpoint.
#[derive(Clone)]
pub struct ActivitySink {
    tx: mpsc::UnboundedSender<ActivityEntry>,
    tail: Arc<RwLock<VecDeque<ActivityEntry>>>,
}

impl ActivitySink {
    pub fn new() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<ActivityEntry>();
        let tail = Arc::new(RwLock::new(VecDeque::with_capacity(TAIL_CAPACITY)));
        let task_tail = Arc::clone(&tail);
        tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                tracing::info!(
                    kind = ?entry.kind,
                    module = %entry.module,
                    description = %entry.description,
                    "activity"
                );
                let mut tail = task_tail.write().await;
                if tail.len() == TAIL_CAPACITY {
                    tail.pop_front();
                }
                tail.push_back(entry);
            }
        });
        Self { tx, tail }
    }

    pub fn record(
        &self,
        kind: ActivityKind,
        module: impl Into<String>,
        description: impl Into<String>,
        metadata: Value,
    ) {
        let entry = ActivityEntry {
            kind,
            module: module.into(),
            description: description.into(),
            metadata,
            recorded_at: Utc::now(),
        };
        // A closed receiver only means the logging task is gone; the
        // inventory operation itself must not fail because of it.
        if self.tx.send(entry).is_err() {
            tracing::warn!("activity sink closed, entry dropped");
        }
    }

    /// Most recent entries, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<ActivityEntry> {
        let tail = self.tail.read().await;
        tail.iter().rev().take(limit).cloned().collect()
    }
}

impl Default for ActivitySink {
    fn default() -> Self {
        Self::new()
    }
}
