use uuid::Uuid;

use crate::application::ports::program_repository::ProgramRepository;

pub struct DeleteProgram<'a, R: ProgramRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProgramRepository + ?Sized> DeleteProgram<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<bool> {
        self.repo.delete(id).await
    }
}
