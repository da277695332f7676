use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadType {
    Purchase,
    Hosting,
    Sale,
    Lease,
}

impl LeadType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Purchase => "Compra",
            Self::Hosting => "Hospedagem",
            Self::Sale => "Venda",
            Self::Lease => "Locação",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Active,
    Won,
    Lost,
    Analyzing,
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl LeadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Won => "Ganho",
            Self::Lost => "Perdido",
            Self::Analyzing => "Em análise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for LeadPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl LeadPriority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Baixa",
            Self::Medium => "Média",
            Self::High => "Alta",
            Self::Urgent => "Urgente",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    Referral,
    SocialMedia,
    Phone,
    Advertisement,
    Other,
}

impl Default for LeadSource {
    fn default() -> Self {
        Self::Other
    }
}

impl LeadSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Website => "Site",
            Self::Referral => "Indicação",
            Self::SocialMedia => "Redes sociais",
            Self::Phone => "Telefone",
            Self::Advertisement => "Anúncio",
            Self::Other => "Outro",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub title: String,
    pub lead_type: LeadType,
    /// Free-form property type ("Apartamento", "Casa", ...).
    pub category: Option<String>,
    pub estimated_value: f64,
    pub funnel_id: Uuid,
    pub stage_id: Uuid,
    pub contact_id: Option<Uuid>,
    pub status: LeadStatus,
    pub priority: LeadPriority,
    pub source: LeadSource,
    pub notes: Option<String>,
    #[serde(default)]
    pub property_ids: Vec<Uuid>,
    #[serde(default)]
    pub organization_ids: Vec<Uuid>,
    #[serde(default)]
    pub activity_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeadRequest {
    pub title: String,
    pub lead_type: LeadType,
    pub category: Option<String>,
    /// Accepts a number or a formatted string ("R$ 1.200.000,00").
    pub estimated_value: Option<Value>,
    pub funnel_id: Uuid,
    pub stage_id: Uuid,
    pub contact_id: Option<Uuid>,
    pub priority: Option<LeadPriority>,
    pub source: Option<LeadSource>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLeadRequest {
    pub title: Option<String>,
    pub lead_type: Option<LeadType>,
    pub category: Option<String>,
    pub estimated_value: Option<Value>,
    pub contact_id: Option<Uuid>,
    pub priority: Option<LeadPriority>,
    pub source: Option<LeadSource>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetStatusRequest {
    pub status: LeadStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeadListQuery {
    pub funnel_id: Option<Uuid>,
    pub status: Option<LeadStatus>,
}
