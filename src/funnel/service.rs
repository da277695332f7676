use super::error::FunnelError;
use super::types::*;
use crate::lead::types::Lead;
use crate::shared::storage::{self, StoragePort, FUNNELS_KEY, LEADS_KEY};
use chrono::Utc;
use log::error;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

pub struct FunnelService {
    store: Arc<dyn StoragePort>,
}

impl FunnelService {
    pub fn new(store: Arc<dyn StoragePort>) -> Self {
        Self { store }
    }

    fn load_all(&self) -> Result<Vec<Funnel>, FunnelError> {
        storage::load(self.store.as_ref(), FUNNELS_KEY).map_err(|e| {
            error!("Failed to read funnels: {e}");
            FunnelError::Storage
        })
    }

    fn save_all(&self, funnels: &[Funnel]) -> Result<(), FunnelError> {
        storage::save(self.store.as_ref(), FUNNELS_KEY, funnels).map_err(|e| {
            error!("Failed to write funnels: {e}");
            FunnelError::Storage
        })
    }

    /// Turns stage inputs into stages with contiguous 1..N orders. Incoming
    /// order is the list position; any previous order value is discarded.
    fn normalize_stages(inputs: Vec<StageInput>) -> Result<Vec<Stage>, FunnelError> {
        if inputs.len() < MIN_STAGES {
            return Err(FunnelError::InvalidInput(format!(
                "a funnel needs at least {MIN_STAGES} stages"
            )));
        }
        inputs
            .into_iter()
            .enumerate()
            .map(|(i, input)| {
                let name = input.name.trim().to_string();
                if name.is_empty() {
                    return Err(FunnelError::InvalidInput(
                        "every stage needs a name".to_string(),
                    ));
                }
                Ok(Stage {
                    id: input.id.unwrap_or_else(Uuid::new_v4),
                    name,
                    order: (i + 1) as i32,
                    color: input
                        .color
                        .filter(|c| !c.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_STAGE_COLOR.to_string()),
                })
            })
            .collect()
    }

    /// A stage can only go away once no lead of the funnel points at it,
    /// otherwise those leads would drop off the board unnoticed.
    fn stages_hold_leads(
        &self,
        funnel_id: Uuid,
        stage_ids: &[Uuid],
    ) -> Result<bool, FunnelError> {
        if stage_ids.is_empty() {
            return Ok(false);
        }
        let leads: Vec<Lead> = storage::load(self.store.as_ref(), LEADS_KEY).map_err(|e| {
            error!("Failed to read leads: {e}");
            FunnelError::Storage
        })?;
        Ok(leads
            .iter()
            .any(|l| l.funnel_id == funnel_id && stage_ids.contains(&l.stage_id)))
    }

    fn reindex(stages: &mut [Stage]) {
        for (i, stage) in stages.iter_mut().enumerate() {
            stage.order = (i + 1) as i32;
        }
    }

    pub fn create(&self, req: CreateFunnelRequest) -> Result<Funnel, FunnelError> {
        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(FunnelError::InvalidInput(
                "funnel name is required".to_string(),
            ));
        }

        let stages = Self::normalize_stages(req.stages)?;
        let now = Utc::now();
        let funnel = Funnel {
            id: Uuid::new_v4(),
            name,
            description: req.description,
            stages,
            created_at: now,
            updated_at: now,
        };

        let mut funnels = self.load_all()?;
        funnels.push(funnel.clone());
        self.save_all(&funnels)?;
        Ok(funnel)
    }

    pub fn update(&self, id: Uuid, req: UpdateFunnelRequest) -> Result<Funnel, FunnelError> {
        let mut funnels = self.load_all()?;
        let funnel = funnels
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(FunnelError::NotFound)?;

        if let Some(name) = req.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(FunnelError::InvalidInput(
                    "funnel name is required".to_string(),
                ));
            }
            funnel.name = name;
        }
        if let Some(description) = req.description {
            funnel.description = Some(description);
        }
        if let Some(stages) = req.stages {
            let stages = Self::normalize_stages(stages)?;
            let kept: HashSet<Uuid> = stages.iter().map(|s| s.id).collect();
            let dropped: Vec<Uuid> = funnel
                .stages
                .iter()
                .map(|s| s.id)
                .filter(|id| !kept.contains(id))
                .collect();
            if self.stages_hold_leads(id, &dropped)? {
                return Err(FunnelError::StageInUse);
            }
            funnel.stages = stages;
        }
        funnel.updated_at = Utc::now();

        let updated = funnel.clone();
        self.save_all(&funnels)?;
        Ok(updated)
    }

    pub fn add_stage(&self, funnel_id: Uuid) -> Result<Funnel, FunnelError> {
        let mut funnels = self.load_all()?;
        let funnel = funnels
            .iter_mut()
            .find(|f| f.id == funnel_id)
            .ok_or(FunnelError::NotFound)?;

        let order = (funnel.stages.len() + 1) as i32;
        funnel.stages.push(Stage {
            id: Uuid::new_v4(),
            name: DEFAULT_STAGE_NAME.to_string(),
            order,
            color: DEFAULT_STAGE_COLOR.to_string(),
        });
        funnel.updated_at = Utc::now();

        let updated = funnel.clone();
        self.save_all(&funnels)?;
        Ok(updated)
    }

    pub fn remove_stage(&self, funnel_id: Uuid, stage_id: Uuid) -> Result<Funnel, FunnelError> {
        let mut funnels = self.load_all()?;
        let funnel = funnels
            .iter_mut()
            .find(|f| f.id == funnel_id)
            .ok_or(FunnelError::NotFound)?;

        if funnel.stage(stage_id).is_none() {
            return Err(FunnelError::StageNotFound);
        }
        if funnel.stages.len() <= MIN_STAGES {
            return Err(FunnelError::StageFloor);
        }
        if self.stages_hold_leads(funnel_id, &[stage_id])? {
            return Err(FunnelError::StageInUse);
        }

        funnel.stages.retain(|s| s.id != stage_id);
        Self::reindex(&mut funnel.stages);
        funnel.updated_at = Utc::now();

        let updated = funnel.clone();
        self.save_all(&funnels)?;
        Ok(updated)
    }

    pub fn list(&self) -> Result<Vec<Funnel>, FunnelError> {
        self.load_all()
    }

    pub fn get(&self, id: Uuid) -> Result<Funnel, FunnelError> {
        self.load_all()?
            .into_iter()
            .find(|f| f.id == id)
            .ok_or(FunnelError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::types::{LeadPriority, LeadSource, LeadStatus, LeadType};
    use crate::shared::storage::MemoryStorage;

    fn lead_in(funnel: &Funnel, stage_id: Uuid) -> Lead {
        let now = Utc::now();
        Lead {
            id: Uuid::new_v4(),
            title: "Apartamento Centro".to_string(),
            lead_type: LeadType::Sale,
            category: None,
            estimated_value: 350_000.0,
            funnel_id: funnel.id,
            stage_id,
            contact_id: None,
            status: LeadStatus::default(),
            priority: LeadPriority::default(),
            source: LeadSource::default(),
            notes: None,
            property_ids: Vec::new(),
            organization_ids: Vec::new(),
            activity_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn service() -> FunnelService {
        FunnelService::new(Arc::new(MemoryStorage::default()))
    }

    fn stage_input(name: &str) -> StageInput {
        StageInput {
            id: None,
            name: name.to_string(),
            color: None,
        }
    }

    fn sales_funnel(service: &FunnelService) -> Funnel {
        service
            .create(CreateFunnelRequest {
                name: "Vendas Imóveis".to_string(),
                description: None,
                stages: vec![
                    stage_input("Lead"),
                    stage_input("Qualificado"),
                    stage_input("Proposta"),
                    stage_input("Fechado"),
                ],
            })
            .unwrap()
    }

    fn assert_contiguous(funnel: &Funnel) {
        let orders: Vec<i32> = funnel.stages.iter().map(|s| s.order).collect();
        let expected: Vec<i32> = (1..=funnel.stages.len() as i32).collect();
        assert_eq!(orders, expected);
    }

    #[test]
    fn create_assigns_contiguous_orders() {
        let service = service();
        let funnel = sales_funnel(&service);
        assert_contiguous(&funnel);
        assert_eq!(funnel.stages[0].name, "Lead");
        assert_eq!(funnel.stages[3].name, "Fechado");
        assert_eq!(funnel.stages[0].color, DEFAULT_STAGE_COLOR);
    }

    #[test]
    fn create_rejects_empty_funnel_name() {
        let service = service();
        let err = service
            .create(CreateFunnelRequest {
                name: "   ".to_string(),
                description: None,
                stages: vec![stage_input("A"), stage_input("B")],
            })
            .unwrap_err();
        assert!(matches!(err, FunnelError::InvalidInput(_)));
    }

    #[test]
    fn create_rejects_empty_stage_name() {
        let service = service();
        let err = service
            .create(CreateFunnelRequest {
                name: "Vendas".to_string(),
                description: None,
                stages: vec![stage_input("A"), stage_input("")],
            })
            .unwrap_err();
        assert!(matches!(err, FunnelError::InvalidInput(_)));
    }

    #[test]
    fn create_rejects_fewer_than_two_stages() {
        let service = service();
        let err = service
            .create(CreateFunnelRequest {
                name: "Vendas".to_string(),
                description: None,
                stages: vec![stage_input("Único")],
            })
            .unwrap_err();
        assert!(matches!(err, FunnelError::InvalidInput(_)));
    }

    #[test]
    fn add_stage_appends_default() {
        let service = service();
        let funnel = sales_funnel(&service);

        let updated = service.add_stage(funnel.id).unwrap();
        assert_eq!(updated.stages.len(), 5);
        let last = updated.stages.last().unwrap();
        assert_eq!(last.name, DEFAULT_STAGE_NAME);
        assert_eq!(last.color, DEFAULT_STAGE_COLOR);
        assert_eq!(last.order, 5);
    }

    #[test]
    fn remove_stage_reindexes() {
        let service = service();
        let funnel = sales_funnel(&service);
        let middle = funnel.stages[1].id;

        let updated = service.remove_stage(funnel.id, middle).unwrap();
        assert_eq!(updated.stages.len(), 3);
        assert_contiguous(&updated);
        assert_eq!(updated.stages[1].name, "Proposta");
    }

    #[test]
    fn remove_stage_rejected_at_floor() {
        let service = service();
        let funnel = service
            .create(CreateFunnelRequest {
                name: "Mínimo".to_string(),
                description: None,
                stages: vec![stage_input("A"), stage_input("B")],
            })
            .unwrap();

        let err = service
            .remove_stage(funnel.id, funnel.stages[0].id)
            .unwrap_err();
        assert!(matches!(err, FunnelError::StageFloor));

        // The funnel must be left unchanged.
        let unchanged = service.get(funnel.id).unwrap();
        assert_eq!(unchanged.stages.len(), 2);
        assert_contiguous(&unchanged);
    }

    #[test]
    fn remove_stage_with_leads_is_rejected() {
        let store = Arc::new(MemoryStorage::default());
        let service = FunnelService::new(store.clone());
        let funnel = sales_funnel(&service);
        let middle = funnel.stages[1].id;
        storage::save(store.as_ref(), LEADS_KEY, &[lead_in(&funnel, middle)]).unwrap();

        let err = service.remove_stage(funnel.id, middle).unwrap_err();
        assert!(matches!(err, FunnelError::StageInUse));

        // The funnel must be left unchanged.
        let unchanged = service.get(funnel.id).unwrap();
        assert_eq!(unchanged.stages.len(), 4);
        assert_contiguous(&unchanged);
    }

    #[test]
    fn remove_stage_ignores_leads_in_other_stages() {
        let store = Arc::new(MemoryStorage::default());
        let service = FunnelService::new(store.clone());
        let funnel = sales_funnel(&service);
        storage::save(
            store.as_ref(),
            LEADS_KEY,
            &[lead_in(&funnel, funnel.stages[0].id)],
        )
        .unwrap();

        let updated = service.remove_stage(funnel.id, funnel.stages[1].id).unwrap();
        assert_eq!(updated.stages.len(), 3);
    }

    #[test]
    fn update_cannot_drop_a_stage_with_leads() {
        let store = Arc::new(MemoryStorage::default());
        let service = FunnelService::new(store.clone());
        let funnel = sales_funnel(&service);
        let occupied = &funnel.stages[1];
        storage::save(store.as_ref(), LEADS_KEY, &[lead_in(&funnel, occupied.id)]).unwrap();

        // Replacement list keeps every stage except the occupied one.
        let err = service
            .update(
                funnel.id,
                UpdateFunnelRequest {
                    name: None,
                    description: None,
                    stages: Some(
                        funnel
                            .stages
                            .iter()
                            .filter(|s| s.id != occupied.id)
                            .map(|s| StageInput {
                                id: Some(s.id),
                                name: s.name.clone(),
                                color: Some(s.color.clone()),
                            })
                            .collect(),
                    ),
                },
            )
            .unwrap_err();
        assert!(matches!(err, FunnelError::StageInUse));

        let unchanged = service.get(funnel.id).unwrap();
        assert_eq!(unchanged.stages.len(), 4);
    }

    #[test]
    fn update_replaces_stages_and_reindexes() {
        let service = service();
        let funnel = sales_funnel(&service);
        let keep = funnel.stages[2].clone();

        let updated = service
            .update(
                funnel.id,
                UpdateFunnelRequest {
                    name: Some("Vendas 2026".to_string()),
                    description: None,
                    stages: Some(vec![
                        StageInput {
                            id: Some(keep.id),
                            name: "Proposta".to_string(),
                            color: Some("blue".to_string()),
                        },
                        stage_input("Assinado"),
                    ]),
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Vendas 2026");
        assert_contiguous(&updated);
        assert_eq!(updated.stages[0].id, keep.id);
        assert_eq!(updated.stages[0].order, 1);
        assert_eq!(updated.stages[0].color, "blue");
    }

    #[test]
    fn get_unknown_is_not_found() {
        let service = service();
        assert!(matches!(
            service.get(Uuid::new_v4()).unwrap_err(),
            FunnelError::NotFound
        ));
    }
}
