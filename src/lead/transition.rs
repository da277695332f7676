//! Drop-event resolution for kanban card moves.
//!
//! The drag library only hands over a source container, an optional
//! destination container and an index; everything here is independent of
//! pointer events so the transition rules can be tested directly.

use super::types::Lead;
use crate::funnel::Stage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DropTarget {
    pub stage_id: Uuid,
    /// Visual position within the destination column. Not persisted.
    #[serde(default)]
    pub index: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DropEvent {
    pub lead_id: Uuid,
    pub source_stage_id: Uuid,
    pub destination: Option<DropTarget>,
}

/// What the store should do with a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDecision {
    /// Write the lead's stage reference to the given stage.
    Commit(Uuid),
    /// Same column: reorder is visual only, nothing is written.
    Keep,
    /// No destination, or a destination outside the funnel: discard.
    Ignore,
}

pub fn resolve_drop(event: &DropEvent, stages: &[Stage]) -> MoveDecision {
    let Some(target) = event.destination else {
        return MoveDecision::Ignore;
    };
    if !stages.iter().any(|s| s.id == target.stage_id) {
        return MoveDecision::Ignore;
    }
    if target.stage_id == event.source_stage_id {
        return MoveDecision::Keep;
    }
    MoveDecision::Commit(target.stage_id)
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved { lead: Lead },
    Unchanged,
    Dropped,
}
