use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Sequential code allocated by the sequence collaborator.
    pub master_code: i64,
    pub name: String,
    pub email: String,
    /// Argon2 hash. Never leaves the server; responses use
    /// [`OrganizationResponse`].
    pub password_hash: String,
    pub active: bool,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    pub fn display_code(&self) -> String {
        format!("{:04}", self.master_code)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationResponse {
    pub id: Uuid,
    pub master_code: i64,
    pub code: String,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponse {
    fn from(org: Organization) -> Self {
        let code = org.display_code();
        Self {
            id: org.id,
            master_code: org.master_code,
            code,
            name: org.name,
            email: org.email,
            active: org.active,
            phone: org.phone,
            address: org.address,
            neighborhood: org.neighborhood,
            city: org.city,
            state: org.state,
            zip_code: org.zip_code,
            created_at: org.created_at,
            updated_at: org.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub sub_code: i64,
    /// Composed identifier, e.g. "0001-02".
    pub code: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Re-hashed when present.
    pub password: Option<String>,
    pub active: Option<bool>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBranchRequest {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}
