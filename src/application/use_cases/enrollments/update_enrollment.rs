use chrono::NaiveDate;
use uuid::Uuid;

use crate::application::ports::enrollment_repository::{
    EnrollmentFields, EnrollmentRepository, EnrollmentWriteError,
};
use crate::domain::enrollment::Enrollment;

#[derive(Debug, thiserror::Error)]
pub enum UpdateEnrollmentError {
    #[error("client is already enrolled in this program")]
    AlreadyEnrolled,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Field-wise patch merged onto the stored row. Outer None = not provided;
/// Some(None) clears the nullable notes column.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentPatch {
    pub client_id: Option<Uuid>,
    pub program_id: Option<Uuid>,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<Option<String>>,
}

pub struct UpdateEnrollment<'a, R: EnrollmentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: EnrollmentRepository + ?Sized> UpdateEnrollment<'a, R> {
    /// Re-pointing the enrollment at another (client, program) pair can
    /// collide with an existing row; that surfaces as `AlreadyEnrolled`.
    pub async fn execute(
        &self,
        id: Uuid,
        patch: EnrollmentPatch,
    ) -> Result<Option<Enrollment>, UpdateEnrollmentError> {
        let current = self
            .repo
            .get_by_id(id)
            .await
            .map_err(UpdateEnrollmentError::Other)?;
        let Some(current) = current else {
            return Ok(None);
        };
        let fields = EnrollmentFields {
            client_id: patch.client_id.unwrap_or(current.client_id),
            program_id: patch.program_id.unwrap_or(current.program_id),
            enrollment_date: patch.enrollment_date.unwrap_or(current.enrollment_date),
            status: patch.status.unwrap_or(current.status),
            notes: patch.notes.unwrap_or(current.notes),
        };
        self.repo.update(id, fields).await.map_err(|e| match e {
            EnrollmentWriteError::Duplicate => UpdateEnrollmentError::AlreadyEnrolled,
            EnrollmentWriteError::Other(e) => UpdateEnrollmentError::Other(e),
        })
    }
}
