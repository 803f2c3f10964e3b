use chrono::NaiveDate;
use uuid::Uuid;

use crate::application::ports::client_repository::{ClientFields, ClientRepository};
use crate::domain::client::{Client, Gender};

/// Field-wise patch merged onto the stored row. Outer None = not provided;
/// for the nullable columns, Some(None) clears the value.
#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub contact_number: Option<String>,
    pub email: Option<Option<String>>,
    pub address: Option<String>,
    pub medical_history: Option<Option<String>>,
}

pub struct UpdateClient<'a, R: ClientRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ClientRepository + ?Sized> UpdateClient<'a, R> {
    pub async fn execute(&self, id: Uuid, patch: ClientPatch) -> anyhow::Result<Option<Client>> {
        let Some(current) = self.repo.get_by_id(id).await? else {
            return Ok(None);
        };
        let fields = ClientFields {
            first_name: patch.first_name.unwrap_or(current.first_name),
            last_name: patch.last_name.unwrap_or(current.last_name),
            date_of_birth: patch.date_of_birth.unwrap_or(current.date_of_birth),
            gender: patch.gender.unwrap_or(current.gender),
            contact_number: patch.contact_number.unwrap_or(current.contact_number),
            email: patch.email.unwrap_or(current.email),
            address: patch.address.unwrap_or(current.address),
            medical_history: patch.medical_history.unwrap_or(current.medical_history),
        };
        self.repo.update(id, fields).await
    }
}
