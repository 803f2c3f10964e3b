use crate::application::ports::enrollment_repository::{EnrollmentFilter, EnrollmentRepository};
use crate::domain::enrollment::Enrollment;

pub struct ListEnrollments<'a, R: EnrollmentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: EnrollmentRepository + ?Sized> ListEnrollments<'a, R> {
    pub async fn execute(&self, filter: EnrollmentFilter) -> anyhow::Result<Vec<Enrollment>> {
        self.repo.list(filter).await
    }
}
