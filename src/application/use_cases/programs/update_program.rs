use uuid::Uuid;

use crate::application::ports::program_repository::ProgramRepository;
use crate::domain::program::HealthProgram;

pub struct UpdateProgram<'a, R: ProgramRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProgramRepository + ?Sized> UpdateProgram<'a, R> {
    /// Absent fields keep their stored values, so full and partial updates
    /// share one path. Returns None when the id does not exist.
    pub async fn execute(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> anyhow::Result<Option<HealthProgram>> {
        let Some(current) = self.repo.get_by_id(id).await? else {
            return Ok(None);
        };
        let name = name.unwrap_or(current.name);
        let description = description.unwrap_or(current.description);
        self.repo.update(id, &name, &description).await
    }
}
