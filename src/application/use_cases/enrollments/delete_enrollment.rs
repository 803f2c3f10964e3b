use uuid::Uuid;

use crate::application::ports::enrollment_repository::EnrollmentRepository;

pub struct DeleteEnrollment<'a, R: EnrollmentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: EnrollmentRepository + ?Sized> DeleteEnrollment<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<bool> {
        self.repo.delete(id).await
    }
}
