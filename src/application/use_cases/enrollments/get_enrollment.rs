use uuid::Uuid;

use crate::application::ports::enrollment_repository::EnrollmentRepository;
use crate::domain::enrollment::Enrollment;

pub struct GetEnrollment<'a, R: EnrollmentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: EnrollmentRepository + ?Sized> GetEnrollment<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Enrollment>> {
        self.repo.get_by_id(id).await
    }
}
