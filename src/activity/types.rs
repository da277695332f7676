use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Call,
    Meeting,
    Email,
    Task,
    Visit,
    FollowUp,
    Presentation,
    Negotiation,
}

impl ActivityType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Call => "Ligação",
            Self::Meeting => "Reunião",
            Self::Email => "E-mail",
            Self::Task => "Tarefa",
            Self::Visit => "Visita",
            Self::FollowUp => "Follow-up",
            Self::Presentation => "Apresentação",
            Self::Negotiation => "Negociação",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Pending,
    Completed,
}

impl Default for ActivityStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl ActivityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Completed => "Concluída",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for ActivityPriority {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    pub activity_type: ActivityType,
    pub lead_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub priority: ActivityPriority,
    pub status: ActivityStatus,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityRequest {
    pub title: String,
    pub activity_type: ActivityType,
    pub lead_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub priority: Option<ActivityPriority>,
    pub checklist: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateActivityRequest {
    pub title: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub lead_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub priority: Option<ActivityPriority>,
    pub status: Option<ActivityStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddChecklistItemRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityListQuery {
    pub lead_id: Option<Uuid>,
    pub status: Option<ActivityStatus>,
}
