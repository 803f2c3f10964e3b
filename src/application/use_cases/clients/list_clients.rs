use crate::application::ports::client_repository::ClientRepository;
use crate::domain::client::{Client, Gender};

pub struct ListClients<'a, R: ClientRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ClientRepository + ?Sized> ListClients<'a, R> {
    pub async fn execute(
        &self,
        search: Option<String>,
        gender: Option<Gender>,
    ) -> anyhow::Result<Vec<Client>> {
        self.repo.list(search, gender).await
    }
}
