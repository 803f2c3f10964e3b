use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::enrollment::Enrollment;

/// Write rejection distinct from other persistence failures: the
/// (client, program) uniqueness constraint. Raised both by the pre-check in
/// the enroll flow and by the database constraint when concurrent writes
/// race past the pre-check.
#[derive(Debug, thiserror::Error)]
pub enum EnrollmentWriteError {
    #[error("enrollment already exists for this client and program")]
    Duplicate,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Default)]
pub struct EnrollmentFilter {
    pub client: Option<Uuid>,
    pub program: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub client_id: Uuid,
    pub program_id: Uuid,
    /// Storage default (current date) applies when absent.
    pub enrollment_date: Option<NaiveDate>,
    /// Storage default ("Active") applies when absent.
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Full writable field set for CRUD updates.
#[derive(Debug, Clone)]
pub struct EnrollmentFields {
    pub client_id: Uuid,
    pub program_id: Uuid,
    pub enrollment_date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
}

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn list(&self, filter: EnrollmentFilter) -> anyhow::Result<Vec<Enrollment>>;

    async fn list_for_client(&self, client_id: Uuid) -> anyhow::Result<Vec<Enrollment>>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Enrollment>>;

    async fn find_by_client_and_program(
        &self,
        client_id: Uuid,
        program_id: Uuid,
    ) -> anyhow::Result<Option<Enrollment>>;

    /// Single atomic insert; a uniqueness violation surfaces as `Duplicate`.
    async fn insert(&self, new: NewEnrollment) -> Result<Enrollment, EnrollmentWriteError>;

    // Ok(None) when the id does not exist.
    async fn update(
        &self,
        id: Uuid,
        fields: EnrollmentFields,
    ) -> Result<Option<Enrollment>, EnrollmentWriteError>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
