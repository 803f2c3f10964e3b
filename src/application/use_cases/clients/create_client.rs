use crate::application::ports::client_repository::{ClientFields, ClientRepository};
use crate::domain::client::Client;

pub struct CreateClient<'a, R: ClientRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ClientRepository + ?Sized> CreateClient<'a, R> {
    pub async fn execute(&self, fields: ClientFields) -> anyhow::Result<Client> {
        self.repo.create(fields).await
    }
}
