use uuid::Uuid;

use crate::application::ports::client_repository::ClientRepository;

pub struct DeleteClient<'a, R: ClientRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ClientRepository + ?Sized> DeleteClient<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<bool> {
        self.repo.delete(id).await
    }
}
