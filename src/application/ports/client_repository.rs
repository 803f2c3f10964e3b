use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::client::{Client, Gender};

/// Full writable field set of a client row. Partial updates are merged onto
/// the stored row before reaching the repository.
#[derive(Debug, Clone)]
pub struct ClientFields {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: String,
    pub medical_history: Option<String>,
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// `search` matches first name, last name, email or contact number;
    /// `gender` is an exact filter.
    async fn list(
        &self,
        search: Option<String>,
        gender: Option<Gender>,
    ) -> anyhow::Result<Vec<Client>>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>>;

    async fn create(&self, fields: ClientFields) -> anyhow::Result<Client>;

    // Returns None when the id does not exist.
    async fn update(&self, id: Uuid, fields: ClientFields) -> anyhow::Result<Option<Client>>;

    /// Returns false when the id does not exist. Cascades to enrollments.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
