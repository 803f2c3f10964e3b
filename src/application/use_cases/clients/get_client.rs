use uuid::Uuid;

use crate::application::ports::client_repository::ClientRepository;
use crate::domain::client::Client;

pub struct GetClient<'a, R: ClientRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ClientRepository + ?Sized> GetClient<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
        self.repo.get_by_id(id).await
    }
}
