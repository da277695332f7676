use super::error::ActivityError;
use super::types::*;
use crate::shared::storage::{self, StoragePort, ACTIVITIES_KEY};
use chrono::Utc;
use log::error;
use std::sync::Arc;
use uuid::Uuid;

pub struct ActivityService {
    store: Arc<dyn StoragePort>,
}

impl ActivityService {
    pub fn new(store: Arc<dyn StoragePort>) -> Self {
        Self { store }
    }

    fn load_all(&self) -> Result<Vec<Activity>, ActivityError> {
        storage::load(self.store.as_ref(), ACTIVITIES_KEY).map_err(|e| {
            error!("Failed to read activities: {e}");
            ActivityError::Storage
        })
    }

    fn save_all(&self, activities: &[Activity]) -> Result<(), ActivityError> {
        storage::save(self.store.as_ref(), ACTIVITIES_KEY, activities).map_err(|e| {
            error!("Failed to write activities: {e}");
            ActivityError::Storage
        })
    }

    fn mutate<F>(&self, id: Uuid, apply: F) -> Result<Activity, ActivityError>
    where
        F: FnOnce(&mut Activity) -> Result<(), ActivityError>,
    {
        let mut activities = self.load_all()?;
        let activity = activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(ActivityError::NotFound)?;
        apply(activity)?;
        activity.updated_at = Utc::now();
        let updated = activity.clone();
        self.save_all(&activities)?;
        Ok(updated)
    }

    pub fn create(&self, req: CreateActivityRequest) -> Result<Activity, ActivityError> {
        let title = req.title.trim().to_string();
        if title.is_empty() {
            return Err(ActivityError::InvalidInput("title is required".to_string()));
        }

        let now = Utc::now();
        let activity = Activity {
            id: Uuid::new_v4(),
            title,
            activity_type: req.activity_type,
            lead_id: req.lead_id,
            contact_id: req.contact_id,
            due_date: req.due_date,
            duration_minutes: req.duration_minutes,
            location: req.location,
            priority: req.priority.unwrap_or_default(),
            status: ActivityStatus::default(),
            checklist: req
                .checklist
                .unwrap_or_default()
                .into_iter()
                .filter(|text| !text.trim().is_empty())
                .map(|text| ChecklistItem {
                    id: Uuid::new_v4(),
                    text,
                    completed: false,
                })
                .collect(),
            completed_at: None,
            created_at: now,
            updated_at: now,
        };

        let mut activities = self.load_all()?;
        activities.push(activity.clone());
        self.save_all(&activities)?;
        Ok(activity)
    }

    pub fn update(&self, id: Uuid, req: UpdateActivityRequest) -> Result<Activity, ActivityError> {
        self.mutate(id, |activity| {
            if let Some(title) = req.title {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return Err(ActivityError::InvalidInput("title is required".to_string()));
                }
                activity.title = title;
            }
            if let Some(activity_type) = req.activity_type {
                activity.activity_type = activity_type;
            }
            if let Some(lead_id) = req.lead_id {
                activity.lead_id = Some(lead_id);
            }
            if let Some(contact_id) = req.contact_id {
                activity.contact_id = Some(contact_id);
            }
            if let Some(due_date) = req.due_date {
                activity.due_date = Some(due_date);
            }
            if let Some(duration) = req.duration_minutes {
                activity.duration_minutes = Some(duration);
            }
            if let Some(location) = req.location {
                activity.location = Some(location);
            }
            if let Some(priority) = req.priority {
                activity.priority = priority;
            }
            if let Some(status) = req.status {
                activity.status = status;
                activity.completed_at = match status {
                    ActivityStatus::Completed => Some(Utc::now()),
                    ActivityStatus::Pending => None,
                };
            }
            Ok(())
        })
    }

    pub fn complete(&self, id: Uuid) -> Result<Activity, ActivityError> {
        self.mutate(id, |activity| {
            activity.status = ActivityStatus::Completed;
            activity.completed_at = Some(Utc::now());
            Ok(())
        })
    }

    pub fn add_checklist_item(&self, id: Uuid, text: String) -> Result<Activity, ActivityError> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ActivityError::InvalidInput(
                "checklist item text is required".to_string(),
            ));
        }
        self.mutate(id, |activity| {
            activity.checklist.push(ChecklistItem {
                id: Uuid::new_v4(),
                text,
                completed: false,
            });
            Ok(())
        })
    }

    pub fn toggle_checklist_item(
        &self,
        id: Uuid,
        item_id: Uuid,
    ) -> Result<Activity, ActivityError> {
        self.mutate(id, |activity| {
            let item = activity
                .checklist
                .iter_mut()
                .find(|i| i.id == item_id)
                .ok_or(ActivityError::ItemNotFound)?;
            item.completed = !item.completed;
            Ok(())
        })
    }

    pub fn remove_checklist_item(
        &self,
        id: Uuid,
        item_id: Uuid,
    ) -> Result<Activity, ActivityError> {
        self.mutate(id, |activity| {
            let before = activity.checklist.len();
            activity.checklist.retain(|i| i.id != item_id);
            if activity.checklist.len() == before {
                return Err(ActivityError::ItemNotFound);
            }
            Ok(())
        })
    }

    pub fn list(&self, query: &ActivityListQuery) -> Result<Vec<Activity>, ActivityError> {
        let mut activities = self.load_all()?;
        if let Some(lead_id) = query.lead_id {
            activities.retain(|a| a.lead_id == Some(lead_id));
        }
        if let Some(status) = query.status {
            activities.retain(|a| a.status == status);
        }
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(activities)
    }

    pub fn get(&self, id: Uuid) -> Result<Activity, ActivityError> {
        self.load_all()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(ActivityError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    fn service() -> ActivityService {
        ActivityService::new(Arc::new(MemoryStorage::default()))
    }

    fn visit(service: &ActivityService) -> Activity {
        service
            .create(CreateActivityRequest {
                title: "Visita ao apartamento".to_string(),
                activity_type: ActivityType::Visit,
                lead_id: None,
                contact_id: None,
                due_date: None,
                duration_minutes: Some(60),
                location: Some("Ipanema".to_string()),
                priority: None,
                checklist: Some(vec![
                    "Confirmar com o proprietário".to_string(),
                    "Levar documentação".to_string(),
                ]),
            })
            .unwrap()
    }

    #[test]
    fn create_requires_title() {
        let service = service();
        let err = service
            .create(CreateActivityRequest {
                title: " ".to_string(),
                activity_type: ActivityType::Call,
                lead_id: None,
                contact_id: None,
                due_date: None,
                duration_minutes: None,
                location: None,
                priority: None,
                checklist: None,
            })
            .unwrap_err();
        assert!(matches!(err, ActivityError::InvalidInput(_)));
    }

    #[test]
    fn checklist_items_toggle_independently() {
        let service = service();
        let activity = visit(&service);
        let first = activity.checklist[0].id;

        let toggled = service.toggle_checklist_item(activity.id, first).unwrap();
        assert!(toggled.checklist[0].completed);
        assert!(!toggled.checklist[1].completed);

        let back = service.toggle_checklist_item(activity.id, first).unwrap();
        assert!(!back.checklist[0].completed);
    }

    #[test]
    fn checklist_items_can_be_added_and_removed() {
        let service = service();
        let activity = visit(&service);

        let grown = service
            .add_checklist_item(activity.id, "Tirar fotos".to_string())
            .unwrap();
        assert_eq!(grown.checklist.len(), 3);

        let shrunk = service
            .remove_checklist_item(activity.id, grown.checklist[0].id)
            .unwrap();
        assert_eq!(shrunk.checklist.len(), 2);

        let err = service
            .remove_checklist_item(activity.id, Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, ActivityError::ItemNotFound));
    }

    #[test]
    fn complete_stamps_completion() {
        let service = service();
        let activity = visit(&service);
        assert_eq!(activity.status, ActivityStatus::Pending);

        let done = service.complete(activity.id).unwrap();
        assert_eq!(done.status, ActivityStatus::Completed);
        assert!(done.completed_at.is_some());
    }

    #[test]
    fn list_filters_by_lead() {
        let service = service();
        let lead_id = Uuid::new_v4();
        service
            .create(CreateActivityRequest {
                title: "Ligar".to_string(),
                activity_type: ActivityType::Call,
                lead_id: Some(lead_id),
                contact_id: None,
                due_date: None,
                duration_minutes: None,
                location: None,
                priority: None,
                checklist: None,
            })
            .unwrap();
        visit(&service);

        let filtered = service
            .list(&ActivityListQuery {
                lead_id: Some(lead_id),
                status: None,
            })
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Ligar");
    }
}
