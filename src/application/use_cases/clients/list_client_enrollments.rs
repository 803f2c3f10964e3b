use uuid::Uuid;

use crate::application::ports::enrollment_repository::EnrollmentRepository;
use crate::domain::enrollment::Enrollment;

pub struct ListClientEnrollments<'a, R: EnrollmentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: EnrollmentRepository + ?Sized> ListClientEnrollments<'a, R> {
    pub async fn execute(&self, client_id: Uuid) -> anyhow::Result<Vec<Enrollment>> {
        self.repo.list_for_client(client_id).await
    }
}
