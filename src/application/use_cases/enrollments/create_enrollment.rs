use crate::application::ports::client_repository::ClientRepository;
use crate::application::ports::enrollment_repository::{
    EnrollmentRepository, EnrollmentWriteError, NewEnrollment,
};
use crate::application::ports::program_repository::ProgramRepository;
use crate::domain::enrollment::Enrollment;

#[derive(Debug, thiserror::Error)]
pub enum CreateEnrollmentError {
    #[error("client not found")]
    ClientNotFound,
    #[error("program not found")]
    ProgramNotFound,
    #[error("client is already enrolled in this program")]
    AlreadyEnrolled,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct CreateEnrollment<'a, C, P, E>
where
    C: ClientRepository + ?Sized,
    P: ProgramRepository + ?Sized,
    E: EnrollmentRepository + ?Sized,
{
    pub clients: &'a C,
    pub programs: &'a P,
    pub enrollments: &'a E,
}

impl<'a, C, P, E> CreateEnrollment<'a, C, P, E>
where
    C: ClientRepository + ?Sized,
    P: ProgramRepository + ?Sized,
    E: EnrollmentRepository + ?Sized,
{
    pub async fn execute(&self, new: NewEnrollment) -> Result<Enrollment, CreateEnrollmentError> {
        if self.clients.get_by_id(new.client_id).await?.is_none() {
            return Err(CreateEnrollmentError::ClientNotFound);
        }
        if self.programs.get_by_id(new.program_id).await?.is_none() {
            return Err(CreateEnrollmentError::ProgramNotFound);
        }
        self.enrollments.insert(new).await.map_err(|e| match e {
            EnrollmentWriteError::Duplicate => CreateEnrollmentError::AlreadyEnrolled,
            EnrollmentWriteError::Other(e) => CreateEnrollmentError::Other(e),
        })
    }
}
