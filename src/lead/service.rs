use super::board::{build_board, FunnelBoard};
use super::error::LeadError;
use super::transition::{resolve_drop, DropEvent, MoveDecision, MoveOutcome};
use super::types::*;
use crate::funnel::Funnel;
use crate::shared::storage::{self, StoragePort, FUNNELS_KEY, LEADS_KEY};
use chrono::Utc;
use log::{error, info};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Parses the estimated value the way the intake form does: numbers pass
/// through, strings are accepted in Brazilian currency formatting, anything
/// unparsable falls back to 0.
pub fn parse_estimated_value(raw: Option<&Value>) -> Result<f64, LeadError> {
    let value = match raw {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_money_string(s),
        Some(_) => 0.0,
    };
    if value < 0.0 {
        return Err(LeadError::InvalidInput(
            "estimated value must be non-negative".to_string(),
        ));
    }
    Ok(value)
}

fn parse_money_string(s: &str) -> f64 {
    let trimmed = s.trim();
    if let Ok(v) = trimmed.parse::<f64>() {
        return v;
    }
    // "R$ 1.200.000,50" -> "1200000.50"
    let cleaned: String = trimmed
        .trim_start_matches("R$")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '-')
        .collect();
    cleaned.replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

pub struct LeadService {
    store: Arc<dyn StoragePort>,
}

impl LeadService {
    pub fn new(store: Arc<dyn StoragePort>) -> Self {
        Self { store }
    }

    fn load_leads(&self) -> Result<Vec<Lead>, LeadError> {
        storage::load(self.store.as_ref(), LEADS_KEY).map_err(|e| {
            error!("Failed to read leads: {e}");
            LeadError::Storage
        })
    }

    fn save_leads(&self, leads: &[Lead]) -> Result<(), LeadError> {
        storage::save(self.store.as_ref(), LEADS_KEY, leads).map_err(|e| {
            error!("Failed to write leads: {e}");
            LeadError::Storage
        })
    }

    fn load_funnel(&self, funnel_id: Uuid) -> Result<Funnel, LeadError> {
        let funnels: Vec<Funnel> =
            storage::load(self.store.as_ref(), FUNNELS_KEY).map_err(|e| {
                error!("Failed to read funnels: {e}");
                LeadError::Storage
            })?;
        funnels
            .into_iter()
            .find(|f| f.id == funnel_id)
            .ok_or(LeadError::FunnelNotFound)
    }

    pub fn create(&self, req: CreateLeadRequest) -> Result<Lead, LeadError> {
        let title = req.title.trim().to_string();
        if title.is_empty() {
            return Err(LeadError::InvalidInput("title is required".to_string()));
        }

        let funnel = self.load_funnel(req.funnel_id)?;
        if funnel.stage(req.stage_id).is_none() {
            return Err(LeadError::InvalidInput(
                "stage does not belong to the funnel".to_string(),
            ));
        }

        let estimated_value = parse_estimated_value(req.estimated_value.as_ref())?;
        let now = Utc::now();
        let lead = Lead {
            id: Uuid::new_v4(),
            title,
            lead_type: req.lead_type,
            category: req.category,
            estimated_value,
            funnel_id: req.funnel_id,
            stage_id: req.stage_id,
            contact_id: req.contact_id,
            status: LeadStatus::default(),
            priority: req.priority.unwrap_or_default(),
            source: req.source.unwrap_or_default(),
            notes: req.notes,
            property_ids: vec![],
            organization_ids: vec![],
            activity_ids: vec![],
            created_at: now,
            updated_at: now,
        };

        let mut leads = self.load_leads()?;
        leads.push(lead.clone());
        self.save_leads(&leads)?;
        Ok(lead)
    }

    /// Replaces mutable fields and stamps `updated_at`. Identity fields
    /// (`id`, `funnel_id`, `created_at`) never change here; stage moves go
    /// through [`LeadService::move_lead`].
    pub fn update(&self, id: Uuid, req: UpdateLeadRequest) -> Result<Lead, LeadError> {
        let mut leads = self.load_leads()?;
        let lead = leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(LeadError::NotFound)?;

        if let Some(title) = req.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(LeadError::InvalidInput("title is required".to_string()));
            }
            lead.title = title;
        }
        if let Some(lead_type) = req.lead_type {
            lead.lead_type = lead_type;
        }
        if let Some(category) = req.category {
            lead.category = Some(category);
        }
        if req.estimated_value.is_some() {
            lead.estimated_value = parse_estimated_value(req.estimated_value.as_ref())?;
        }
        if let Some(contact_id) = req.contact_id {
            lead.contact_id = Some(contact_id);
        }
        if let Some(priority) = req.priority {
            lead.priority = priority;
        }
        if let Some(source) = req.source {
            lead.source = source;
        }
        if let Some(notes) = req.notes {
            lead.notes = Some(notes);
        }
        lead.updated_at = Utc::now();

        let updated = lead.clone();
        self.save_leads(&leads)?;
        Ok(updated)
    }

    pub fn set_status(&self, id: Uuid, status: LeadStatus) -> Result<Lead, LeadError> {
        let mut leads = self.load_leads()?;
        let lead = leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(LeadError::NotFound)?;
        lead.status = status;
        lead.updated_at = Utc::now();

        let updated = lead.clone();
        self.save_leads(&leads)?;
        Ok(updated)
    }

    /// Applies a finished drag. A drop with no destination or onto a stage
    /// outside the lead's funnel leaves the store untouched; a same-stage
    /// drop is a visual reorder only.
    pub fn move_lead(&self, event: DropEvent) -> Result<MoveOutcome, LeadError> {
        let mut leads = self.load_leads()?;
        let lead = leads
            .iter_mut()
            .find(|l| l.id == event.lead_id)
            .ok_or(LeadError::NotFound)?;

        let funnel = self.load_funnel(lead.funnel_id)?;
        match resolve_drop(&event, &funnel.stages) {
            MoveDecision::Ignore => Ok(MoveOutcome::Dropped),
            MoveDecision::Keep => Ok(MoveOutcome::Unchanged),
            MoveDecision::Commit(stage_id) => {
                let from = lead.stage_id;
                lead.stage_id = stage_id;
                lead.updated_at = Utc::now();
                let moved = lead.clone();
                self.save_leads(&leads)?;
                info!("Lead {} moved from stage {from} to {stage_id}", moved.id);
                Ok(MoveOutcome::Moved { lead: moved })
            }
        }
    }

    pub fn board(&self, funnel_id: Uuid) -> Result<FunnelBoard, LeadError> {
        let funnel = self.load_funnel(funnel_id)?;
        let leads = self.load_leads()?;
        Ok(build_board(&funnel, &leads))
    }

    pub fn list(&self, query: &LeadListQuery) -> Result<Vec<Lead>, LeadError> {
        let mut leads = self.load_leads()?;
        if let Some(funnel_id) = query.funnel_id {
            leads.retain(|l| l.funnel_id == funnel_id);
        }
        if let Some(status) = query.status {
            leads.retain(|l| l.status == status);
        }
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    pub fn get(&self, id: Uuid) -> Result<Lead, LeadError> {
        self.load_leads()?
            .into_iter()
            .find(|l| l.id == id)
            .ok_or(LeadError::NotFound)
    }
}
