//! Kanban view of a funnel: one column per stage, leads grouped by stage
//! reference, per-column count and summed estimated value. Recomputed per
//! request; the stage index keeps the pass linear in the number of leads.

use super::types::Lead;
use crate::funnel::Funnel;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub stage_id: Uuid,
    pub name: String,
    pub order: i32,
    pub color: String,
    pub leads: Vec<Lead>,
    pub lead_count: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunnelBoard {
    pub funnel_id: Uuid,
    pub funnel_name: String,
    pub columns: Vec<BoardColumn>,
}

pub fn build_board(funnel: &Funnel, leads: &[Lead]) -> FunnelBoard {
    let mut by_stage: HashMap<Uuid, Vec<Lead>> = HashMap::new();
    for lead in leads.iter().filter(|l| l.funnel_id == funnel.id) {
        by_stage.entry(lead.stage_id).or_default().push(lead.clone());
    }

    let mut stages: Vec<_> = funnel.stages.iter().collect();
    stages.sort_by_key(|s| s.order);

    let columns = stages
        .into_iter()
        .map(|stage| {
            let mut column_leads = by_stage.remove(&stage.id).unwrap_or_default();
            column_leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let total_value = column_leads.iter().map(|l| l.estimated_value).sum();
            BoardColumn {
                stage_id: stage.id,
                name: stage.name.clone(),
                order: stage.order,
                color: stage.color.clone(),
                lead_count: column_leads.len(),
                total_value,
                leads: column_leads,
            }
        })
        .collect();

    FunnelBoard {
        funnel_id: funnel.id,
        funnel_name: funnel.name.clone(),
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::Stage;
    use crate::lead::types::{LeadPriority, LeadSource, LeadStatus, LeadType};
    use chrono::Utc;

    fn funnel_with_stages(n: usize) -> Funnel {
        let now = Utc::now();
        Funnel {
            id: Uuid::new_v4(),
            name: "Vendas".to_string(),
            description: None,
            stages: (1..=n)
                .map(|i| Stage {
                    id: Uuid::new_v4(),
                    name: format!("Etapa {i}"),
                    order: i as i32,
                    color: "gray".to_string(),
                })
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    fn lead_in(funnel: &Funnel, stage_idx: usize, value: f64) -> Lead {
        let now = Utc::now();
        Lead {
            id: Uuid::new_v4(),
            title: "Lead".to_string(),
            lead_type: LeadType::Purchase,
            category: None,
            estimated_value: value,
            funnel_id: funnel.id,
            stage_id: funnel.stages[stage_idx].id,
            contact_id: None,
            status: LeadStatus::Active,
            priority: LeadPriority::Medium,
            source: LeadSource::Other,
            notes: None,
            property_ids: vec![],
            organization_ids: vec![],
            activity_ids: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn columns_follow_stage_order_and_aggregate() {
        let funnel = funnel_with_stages(3);
        let leads = vec![
            lead_in(&funnel, 0, 100.0),
            lead_in(&funnel, 0, 250.0),
            lead_in(&funnel, 2, 1_000.0),
        ];

        let board = build_board(&funnel, &leads);
        assert_eq!(board.columns.len(), 3);
        assert_eq!(board.columns[0].lead_count, 2);
        assert_eq!(board.columns[0].total_value, 350.0);
        assert_eq!(board.columns[1].lead_count, 0);
        assert_eq!(board.columns[1].total_value, 0.0);
        assert_eq!(board.columns[2].lead_count, 1);
        assert_eq!(board.columns[2].total_value, 1_000.0);
    }

    #[test]
    fn leads_of_other_funnels_are_excluded() {
        let funnel = funnel_with_stages(2);
        let other = funnel_with_stages(2);
        let leads = vec![lead_in(&other, 0, 500.0)];

        let board = build_board(&funnel, &leads);
        assert!(board.columns.iter().all(|c| c.lead_count == 0));
    }
}
