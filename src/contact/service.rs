use super::error::ContactError;
use super::types::*;
use crate::shared::storage::{self, StoragePort, CONTACTS_KEY};
use chrono::Utc;
use log::error;
use std::sync::Arc;
use uuid::Uuid;

pub struct ContactService {
    store: Arc<dyn StoragePort>,
}

impl ContactService {
    pub fn new(store: Arc<dyn StoragePort>) -> Self {
        Self { store }
    }

    fn load_all(&self) -> Result<Vec<Contact>, ContactError> {
        storage::load(self.store.as_ref(), CONTACTS_KEY).map_err(|e| {
            error!("Failed to read contacts: {e}");
            ContactError::Storage
        })
    }

    fn save_all(&self, contacts: &[Contact]) -> Result<(), ContactError> {
        storage::save(self.store.as_ref(), CONTACTS_KEY, contacts).map_err(|e| {
            error!("Failed to write contacts: {e}");
            ContactError::Storage
        })
    }

    /// Linear scan for an email collision, excluding `exclude_id` so an edit
    /// keeping its own email passes. Comparison is case-insensitive.
    fn email_taken(contacts: &[Contact], email: &str, exclude_id: Option<Uuid>) -> bool {
        let needle = email.trim().to_lowercase();
        contacts
            .iter()
            .filter(|c| Some(c.id) != exclude_id)
            .any(|c| c.email.trim().to_lowercase() == needle)
    }

    pub fn create(&self, req: CreateContactRequest) -> Result<Contact, ContactError> {
        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(ContactError::InvalidInput("name is required".to_string()));
        }
        let email = req.email.trim().to_string();
        if email.is_empty() {
            return Err(ContactError::InvalidInput("email is required".to_string()));
        }

        let mut contacts = self.load_all()?;
        if Self::email_taken(&contacts, &email, None) {
            return Err(ContactError::DuplicateEmail);
        }

        let contact_type = req.contact_type.unwrap_or_default();
        let now = Utc::now();
        let contact = Contact {
            id: Uuid::new_v4(),
            name,
            email,
            phone: req.phone,
            contact_type,
            // Company/position only describe person contacts.
            company: match contact_type {
                ContactType::Person => req.company,
                ContactType::Company => None,
            },
            position: match contact_type {
                ContactType::Person => req.position,
                ContactType::Company => None,
            },
            address: req.address,
            neighborhood: req.neighborhood,
            city: req.city,
            state: req.state,
            zip_code: req.zip_code,
            notes: req.notes,
            source: req.source.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        contacts.push(contact.clone());
        self.save_all(&contacts)?;
        Ok(contact)
    }

    pub fn update(&self, id: Uuid, req: UpdateContactRequest) -> Result<Contact, ContactError> {
        let mut contacts = self.load_all()?;
        if !contacts.iter().any(|c| c.id == id) {
            return Err(ContactError::NotFound);
        }

        if let Some(ref email) = req.email {
            let email = email.trim();
            if email.is_empty() {
                return Err(ContactError::InvalidInput("email is required".to_string()));
            }
            if Self::email_taken(&contacts, email, Some(id)) {
                return Err(ContactError::DuplicateEmail);
            }
        }

        let contact = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ContactError::NotFound)?;

        if let Some(name) = req.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ContactError::InvalidInput("name is required".to_string()));
            }
            contact.name = name;
        }
        if let Some(email) = req.email {
            contact.email = email.trim().to_string();
        }
        if let Some(phone) = req.phone {
            contact.phone = Some(phone);
        }
        if let Some(contact_type) = req.contact_type {
            contact.contact_type = contact_type;
        }
        if let Some(company) = req.company {
            contact.company = Some(company);
        }
        if let Some(position) = req.position {
            contact.position = Some(position);
        }
        if contact.contact_type == ContactType::Company {
            contact.company = None;
            contact.position = None;
        }
        if let Some(address) = req.address {
            contact.address = Some(address);
        }
        if let Some(neighborhood) = req.neighborhood {
            contact.neighborhood = Some(neighborhood);
        }
        if let Some(city) = req.city {
            contact.city = Some(city);
        }
        if let Some(state) = req.state {
            contact.state = Some(state);
        }
        if let Some(zip_code) = req.zip_code {
            contact.zip_code = Some(zip_code);
        }
        if let Some(notes) = req.notes {
            contact.notes = Some(notes);
        }
        if let Some(source) = req.source {
            contact.source = source;
        }
        contact.updated_at = Utc::now();

        let updated = contact.clone();
        self.save_all(&contacts)?;
        Ok(updated)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), ContactError> {
        let mut contacts = self.load_all()?;
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        if contacts.len() == before {
            return Err(ContactError::NotFound);
        }
        self.save_all(&contacts)
    }

    pub fn list(&self) -> Result<Vec<Contact>, ContactError> {
        let mut contacts = self.load_all()?;
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contacts)
    }

    pub fn get(&self, id: Uuid) -> Result<Contact, ContactError> {
        self.load_all()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(ContactError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    fn service() -> ContactService {
        ContactService::new(Arc::new(MemoryStorage::default()))
    }

    fn request(name: &str, email: &str) -> CreateContactRequest {
        CreateContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            contact_type: None,
            company: None,
            position: None,
            address: None,
            neighborhood: None,
            city: None,
            state: None,
            zip_code: None,
            notes: None,
            source: None,
        }
    }

    fn empty_update() -> UpdateContactRequest {
        UpdateContactRequest {
            name: None,
            email: None,
            phone: None,
            contact_type: None,
            company: None,
            position: None,
            address: None,
            neighborhood: None,
            city: None,
            state: None,
            zip_code: None,
            notes: None,
            source: None,
        }
    }

    #[test]
    fn duplicate_email_is_rejected_case_insensitively() {
        let service = service();
        service.create(request("João", "joao@email.com")).unwrap();

        let err = service
            .create(request("Outro João", "JOAO@Email.com"))
            .unwrap_err();
        assert!(matches!(err, ContactError::DuplicateEmail));
    }

    #[test]
    fn editing_to_own_email_succeeds() {
        let service = service();
        let contact = service.create(request("Maria", "maria@email.com")).unwrap();

        let updated = service
            .update(
                contact.id,
                UpdateContactRequest {
                    name: Some("Maria Souza".to_string()),
                    email: Some("maria@email.com".to_string()),
                    ..empty_update()
                },
            )
            .unwrap();
        assert_eq!(updated.email, "maria@email.com");
        assert_eq!(updated.name, "Maria Souza");
    }

    #[test]
    fn editing_to_another_contacts_email_is_rejected() {
        let service = service();
        service.create(request("A", "a@email.com")).unwrap();
        let b = service.create(request("B", "b@email.com")).unwrap();

        let err = service
            .update(
                b.id,
                UpdateContactRequest {
                    email: Some("a@email.com".to_string()),
                    ..empty_update()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ContactError::DuplicateEmail));
    }

    #[test]
    fn updating_an_unknown_contact_is_not_found_even_with_a_taken_email() {
        let service = service();
        service.create(request("A", "a@email.com")).unwrap();

        let err = service
            .update(
                Uuid::new_v4(),
                UpdateContactRequest {
                    email: Some("a@email.com".to_string()),
                    ..empty_update()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ContactError::NotFound));
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let service = service();
        assert!(matches!(
            service.create(request("", "x@email.com")).unwrap_err(),
            ContactError::InvalidInput(_)
        ));
        assert!(matches!(
            service.create(request("X", "  ")).unwrap_err(),
            ContactError::InvalidInput(_)
        ));
    }

    #[test]
    fn company_contacts_drop_person_fields() {
        let service = service();
        let contact = service
            .create(CreateContactRequest {
                contact_type: Some(ContactType::Company),
                company: Some("Imobiliária X".to_string()),
                position: Some("Diretor".to_string()),
                ..request("Imobiliária X", "contato@imobx.com")
            })
            .unwrap();
        assert_eq!(contact.company, None);
        assert_eq!(contact.position, None);
    }

    #[test]
    fn delete_removes_contact() {
        let service = service();
        let contact = service.create(request("Temp", "temp@email.com")).unwrap();
        service.delete(contact.id).unwrap();
        assert!(matches!(
            service.get(contact.id).unwrap_err(),
            ContactError::NotFound
        ));
    }
}
