use crate::application::ports::program_repository::ProgramRepository;
use crate::domain::program::HealthProgram;

pub struct CreateProgram<'a, R: ProgramRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProgramRepository + ?Sized> CreateProgram<'a, R> {
    pub async fn execute(&self, name: &str, description: &str) -> anyhow::Result<HealthProgram> {
        self.repo.create(name, description).await
    }
}
