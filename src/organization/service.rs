use super::error::OrganizationError;
use super::sequence::SequenceAllocator;
use super::types::*;
use crate::shared::storage::{self, StoragePort, BRANCHES_KEY, ORGANIZATIONS_KEY};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use chrono::Utc;
use log::error;
use std::sync::Arc;
use uuid::Uuid;

const MASTER_SEQUENCE: &str = "organization_master";

pub struct OrganizationService {
    store: Arc<dyn StoragePort>,
    sequences: SequenceAllocator,
}

impl OrganizationService {
    pub fn new(store: Arc<dyn StoragePort>) -> Self {
        let sequences = SequenceAllocator::new(store.clone());
        Self { store, sequences }
    }

    fn load_orgs(&self) -> Result<Vec<Organization>, OrganizationError> {
        storage::load(self.store.as_ref(), ORGANIZATIONS_KEY).map_err(|e| {
            error!("Failed to read organizations: {e}");
            OrganizationError::Storage
        })
    }

    fn save_orgs(&self, orgs: &[Organization]) -> Result<(), OrganizationError> {
        storage::save(self.store.as_ref(), ORGANIZATIONS_KEY, orgs).map_err(|e| {
            error!("Failed to write organizations: {e}");
            OrganizationError::Storage
        })
    }

    fn load_branches(&self) -> Result<Vec<Branch>, OrganizationError> {
        storage::load(self.store.as_ref(), BRANCHES_KEY).map_err(|e| {
            error!("Failed to read branches: {e}");
            OrganizationError::Storage
        })
    }

    fn save_branches(&self, branches: &[Branch]) -> Result<(), OrganizationError> {
        storage::save(self.store.as_ref(), BRANCHES_KEY, branches).map_err(|e| {
            error!("Failed to write branches: {e}");
            OrganizationError::Storage
        })
    }

    fn hash_password(raw: &str) -> Result<String, OrganizationError> {
        if raw.trim().is_empty() {
            return Err(OrganizationError::InvalidInput(
                "password is required".to_string(),
            ));
        }
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!("Password hashing failed: {e}");
                OrganizationError::PasswordHash
            })
    }

    pub fn create(
        &self,
        req: CreateOrganizationRequest,
    ) -> Result<OrganizationResponse, OrganizationError> {
        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(OrganizationError::InvalidInput(
                "name is required".to_string(),
            ));
        }
        let email = req.email.trim().to_string();
        if email.is_empty() {
            return Err(OrganizationError::InvalidInput(
                "email is required".to_string(),
            ));
        }

        let password_hash = Self::hash_password(&req.password)?;
        let master_code = self.sequences.next(MASTER_SEQUENCE).map_err(|e| {
            error!("Master code allocation failed: {e}");
            OrganizationError::Storage
        })?;

        let now = Utc::now();
        let org = Organization {
            id: Uuid::new_v4(),
            master_code,
            name,
            email,
            password_hash,
            active: true,
            phone: req.phone,
            address: req.address,
            neighborhood: req.neighborhood,
            city: req.city,
            state: req.state,
            zip_code: req.zip_code,
            created_at: now,
            updated_at: now,
        };

        let mut orgs = self.load_orgs()?;
        orgs.push(org.clone());
        self.save_orgs(&orgs)?;
        Ok(org.into())
    }

    pub fn update(
        &self,
        id: Uuid,
        req: UpdateOrganizationRequest,
    ) -> Result<OrganizationResponse, OrganizationError> {
        let password_hash = match req.password {
            Some(ref raw) => Some(Self::hash_password(raw)?),
            None => None,
        };

        let mut orgs = self.load_orgs()?;
        let org = orgs
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(OrganizationError::NotFound)?;

        if let Some(name) = req.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(OrganizationError::InvalidInput(
                    "name is required".to_string(),
                ));
            }
            org.name = name;
        }
        if let Some(email) = req.email {
            let email = email.trim().to_string();
            if email.is_empty() {
                return Err(OrganizationError::InvalidInput(
                    "email is required".to_string(),
                ));
            }
            org.email = email;
        }
        if let Some(hash) = password_hash {
            org.password_hash = hash;
        }
        if let Some(active) = req.active {
            org.active = active;
        }
        if let Some(phone) = req.phone {
            org.phone = Some(phone);
        }
        if let Some(address) = req.address {
            org.address = Some(address);
        }
        if let Some(neighborhood) = req.neighborhood {
            org.neighborhood = Some(neighborhood);
        }
        if let Some(city) = req.city {
            org.city = Some(city);
        }
        if let Some(state) = req.state {
            org.state = Some(state);
        }
        if let Some(zip_code) = req.zip_code {
            org.zip_code = Some(zip_code);
        }
        org.updated_at = Utc::now();

        let updated = org.clone();
        self.save_orgs(&orgs)?;
        Ok(updated.into())
    }

    /// Removes the organization and, since branches are exclusively owned,
    /// all of its branches. Two writes, best-effort.
    pub fn delete(&self, id: Uuid) -> Result<(), OrganizationError> {
        let mut orgs = self.load_orgs()?;
        let before = orgs.len();
        orgs.retain(|o| o.id != id);
        if orgs.len() == before {
            return Err(OrganizationError::NotFound);
        }
        self.save_orgs(&orgs)?;

        let mut branches = self.load_branches()?;
        branches.retain(|b| b.organization_id != id);
        self.save_branches(&branches)
    }

    pub fn list(&self) -> Result<Vec<OrganizationResponse>, OrganizationError> {
        let mut orgs = self.load_orgs()?;
        orgs.sort_by_key(|o| o.master_code);
        Ok(orgs.into_iter().map(Into::into).collect())
    }

    pub fn get(&self, id: Uuid) -> Result<OrganizationResponse, OrganizationError> {
        self.load_orgs()?
            .into_iter()
            .find(|o| o.id == id)
            .map(Into::into)
            .ok_or(OrganizationError::NotFound)
    }

    pub fn create_branch(
        &self,
        organization_id: Uuid,
        req: CreateBranchRequest,
    ) -> Result<Branch, OrganizationError> {
        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(OrganizationError::InvalidInput(
                "name is required".to_string(),
            ));
        }

        let orgs = self.load_orgs()?;
        let org = orgs
            .iter()
            .find(|o| o.id == organization_id)
            .ok_or(OrganizationError::NotFound)?;

        let sub_code = self
            .sequences
            .next(&format!("branch:{organization_id}"))
            .map_err(|e| {
                error!("Branch code allocation failed: {e}");
                OrganizationError::Storage
            })?;

        let branch = Branch {
            id: Uuid::new_v4(),
            organization_id,
            sub_code,
            code: format!("{}-{:02}", org.display_code(), sub_code),
            name,
            phone: req.phone,
            address: req.address,
            neighborhood: req.neighborhood,
            city: req.city,
            state: req.state,
            zip_code: req.zip_code,
            created_at: Utc::now(),
        };

        let mut branches = self.load_branches()?;
        branches.push(branch.clone());
        self.save_branches(&branches)?;
        Ok(branch)
    }

    pub fn delete_branch(
        &self,
        organization_id: Uuid,
        branch_id: Uuid,
    ) -> Result<(), OrganizationError> {
        let mut branches = self.load_branches()?;
        let before = branches.len();
        branches.retain(|b| !(b.id == branch_id && b.organization_id == organization_id));
        if branches.len() == before {
            return Err(OrganizationError::BranchNotFound);
        }
        self.save_branches(&branches)
    }

    pub fn list_branches(&self, organization_id: Uuid) -> Result<Vec<Branch>, OrganizationError> {
        let mut branches = self.load_branches()?;
        branches.retain(|b| b.organization_id == organization_id);
        branches.sort_by_key(|b| b.sub_code);
        Ok(branches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use serde_json::Value;

    fn service() -> OrganizationService {
        OrganizationService::new(Arc::new(MemoryStorage::default()))
    }

    fn request(name: &str, email: &str) -> CreateOrganizationRequest {
        CreateOrganizationRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "segredo-forte".to_string(),
            phone: None,
            address: None,
            neighborhood: None,
            city: None,
            state: None,
            zip_code: None,
        }
    }

    #[test]
    fn master_codes_are_sequential() {
        let service = service();
        let a = service.create(request("Org A", "a@org.com")).unwrap();
        let b = service.create(request("Org B", "b@org.com")).unwrap();
        assert_eq!(a.master_code, 1);
        assert_eq!(b.master_code, 2);
        assert_eq!(a.code, "0001");
    }

    #[test]
    fn password_is_stored_hashed_and_never_serialized() {
        let store = Arc::new(MemoryStorage::default());
        let service = OrganizationService::new(store.clone());
        let org = service.create(request("Org", "org@org.com")).unwrap();

        // Stored record carries an argon2 hash, not the raw password.
        let rows: Vec<Organization> =
            storage::load(store.as_ref(), ORGANIZATIONS_KEY).unwrap();
        assert!(rows[0].password_hash.starts_with("$argon2"));
        assert_ne!(rows[0].password_hash, "segredo-forte");

        // The response type has no password field at all.
        let serialized = serde_json::to_value(&org).unwrap();
        let Value::Object(map) = serialized else {
            panic!("expected object");
        };
        assert!(!map.keys().any(|k| k.contains("password")));
    }

    #[test]
    fn branch_codes_compose_master_and_sub() {
        let service = service();
        let org = service.create(request("Org", "org@org.com")).unwrap();

        let branch_req = CreateBranchRequest {
            name: "Filial Centro".to_string(),
            phone: None,
            address: None,
            neighborhood: None,
            city: None,
            state: None,
            zip_code: None,
        };
        let first = service.create_branch(org.id, branch_req.clone()).unwrap();
        let second = service.create_branch(org.id, branch_req).unwrap();

        assert_eq!(first.code, "0001-01");
        assert_eq!(second.code, "0001-02");
    }

    #[test]
    fn deleting_a_branch_leaves_the_organization() {
        let service = service();
        let org = service.create(request("Org", "org@org.com")).unwrap();
        let branch = service
            .create_branch(
                org.id,
                CreateBranchRequest {
                    name: "Filial".to_string(),
                    phone: None,
                    address: None,
                    neighborhood: None,
                    city: None,
                    state: None,
                    zip_code: None,
                },
            )
            .unwrap();

        service.delete_branch(org.id, branch.id).unwrap();
        assert!(service.list_branches(org.id).unwrap().is_empty());
        assert!(service.get(org.id).is_ok());

        // Deleting again reports the branch as gone.
        assert!(matches!(
            service.delete_branch(org.id, branch.id).unwrap_err(),
            OrganizationError::BranchNotFound
        ));
    }

    #[test]
    fn deleting_an_organization_cascades_to_branches() {
        let service = service();
        let org = service.create(request("Org", "org@org.com")).unwrap();
        service
            .create_branch(
                org.id,
                CreateBranchRequest {
                    name: "Filial".to_string(),
                    phone: None,
                    address: None,
                    neighborhood: None,
                    city: None,
                    state: None,
                    zip_code: None,
                },
            )
            .unwrap();

        service.delete(org.id).unwrap();
        assert!(service.list_branches(org.id).unwrap().is_empty());
        assert!(matches!(
            service.get(org.id).unwrap_err(),
            OrganizationError::NotFound
        ));
    }
}
