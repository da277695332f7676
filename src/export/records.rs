//! Record shaping: flattens store entities into header + rows of display
//! strings. Every foreign key is resolved to a label here; rendering to a
//! concrete file format lives in [`super::render`].

use super::error::ExportError;
use crate::activity::Activity;
use crate::contact::Contact;
use crate::funnel::Funnel;
use crate::lead::Lead;
use chrono::{DateTime, Utc};

const MISSING: &str = "-";

#[derive(Debug, Clone)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn headers(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

fn date(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn opt(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

pub fn lead_records(
    leads: &[Lead],
    funnels: &[Funnel],
    contacts: &[Contact],
) -> Result<ExportTable, ExportError> {
    if leads.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let rows = leads
        .iter()
        .map(|lead| {
            let funnel = funnels.iter().find(|f| f.id == lead.funnel_id);
            let funnel_name = funnel.map_or(MISSING.to_string(), |f| f.name.clone());
            let stage_name = funnel
                .and_then(|f| f.stage(lead.stage_id))
                .map_or(MISSING.to_string(), |s| s.name.clone());
            let contact_name = lead
                .contact_id
                .and_then(|id| contacts.iter().find(|c| c.id == id))
                .map_or(MISSING.to_string(), |c| c.name.clone());

            vec![
                lead.title.clone(),
                lead.lead_type.label().to_string(),
                opt(&lead.category),
                money(lead.estimated_value),
                funnel_name,
                stage_name,
                contact_name,
                lead.status.label().to_string(),
                lead.priority.label().to_string(),
                lead.source.label().to_string(),
                date(&lead.created_at),
            ]
        })
        .collect();

    Ok(ExportTable {
        headers: headers(&[
            "Título",
            "Tipo",
            "Categoria",
            "Valor Estimado",
            "Funil",
            "Etapa",
            "Contato",
            "Status",
            "Prioridade",
            "Origem",
            "Criado em",
        ]),
        rows,
    })
}

pub fn contact_records(contacts: &[Contact]) -> Result<ExportTable, ExportError> {
    if contacts.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let rows = contacts
        .iter()
        .map(|contact| {
            vec![
                contact.name.clone(),
                contact.email.clone(),
                opt(&contact.phone),
                contact.contact_type.label().to_string(),
                opt(&contact.company),
                opt(&contact.position),
                opt(&contact.city),
                opt(&contact.state),
                date(&contact.created_at),
            ]
        })
        .collect();

    Ok(ExportTable {
        headers: headers(&[
            "Nome",
            "E-mail",
            "Telefone",
            "Tipo",
            "Empresa",
            "Cargo",
            "Cidade",
            "Estado",
            "Criado em",
        ]),
        rows,
    })
}

pub fn activity_records(
    activities: &[Activity],
    leads: &[Lead],
    contacts: &[Contact],
) -> Result<ExportTable, ExportError> {
    if activities.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let rows = activities
        .iter()
        .map(|activity| {
            let lead_title = activity
                .lead_id
                .and_then(|id| leads.iter().find(|l| l.id == id))
                .map_or(MISSING.to_string(), |l| l.title.clone());
            let contact_name = activity
                .contact_id
                .and_then(|id| contacts.iter().find(|c| c.id == id))
                .map_or(MISSING.to_string(), |c| c.name.clone());
            let checklist_done = activity
                .checklist
                .iter()
                .filter(|i| i.completed)
                .count();

            vec![
                activity.title.clone(),
                activity.activity_type.label().to_string(),
                lead_title,
                contact_name,
                activity
                    .due_date
                    .as_ref()
                    .map_or(MISSING.to_string(), date),
                activity.status.label().to_string(),
                format!("{checklist_done}/{}", activity.checklist.len()),
                date(&activity.created_at),
            ]
        })
        .collect();

    Ok(ExportTable {
        headers: headers(&[
            "Título",
            "Tipo",
            "Lead",
            "Contato",
            "Vencimento",
            "Status",
            "Checklist",
            "Criado em",
        ]),
        rows,
    })
}
