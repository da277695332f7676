use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum number of stages a funnel must keep at all times.
pub const MIN_STAGES: usize = 2;

/// Color token used for stages created without an explicit color.
pub const DEFAULT_STAGE_COLOR: &str = "gray";

pub const DEFAULT_STAGE_NAME: &str = "Nova etapa";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: Uuid,
    pub name: String,
    /// 1-based, contiguous within the owning funnel. Reassigned on every save.
    pub order: i32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Funnel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub stages: Vec<Stage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Funnel {
    pub fn stage(&self, stage_id: Uuid) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageInput {
    /// Present when editing an existing stage; leads keep pointing at it.
    pub id: Option<Uuid>,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFunnelRequest {
    pub name: String,
    pub description: Option<String>,
    pub stages: Vec<StageInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFunnelRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub stages: Option<Vec<StageInput>>,
}
