use uuid::Uuid;

use crate::application::ports::program_repository::ProgramRepository;
use crate::domain::program::HealthProgram;

pub struct GetProgram<'a, R: ProgramRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProgramRepository + ?Sized> GetProgram<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<HealthProgram>> {
        self.repo.get_by_id(id).await
    }
}
