use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::program::HealthProgram;

#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// `search` matches name or description, case-insensitive contains.
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<HealthProgram>>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<HealthProgram>>;

    async fn create(&self, name: &str, description: &str) -> anyhow::Result<HealthProgram>;

    // Returns None when the id does not exist.
    async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
    ) -> anyhow::Result<Option<HealthProgram>>;

    /// Returns false when the id does not exist. Dependent enrollments are
    /// removed by the storage layer's cascade rule.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
