use crate::application::ports::program_repository::ProgramRepository;
use crate::domain::program::HealthProgram;

pub struct ListPrograms<'a, R: ProgramRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProgramRepository + ?Sized> ListPrograms<'a, R> {
    pub async fn execute(&self, search: Option<String>) -> anyhow::Result<Vec<HealthProgram>> {
        self.repo.list(search).await
    }
}
