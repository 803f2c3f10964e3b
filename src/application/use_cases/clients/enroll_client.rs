use chrono::NaiveDate;
use uuid::Uuid;

use crate::application::ports::client_repository::ClientRepository;
use crate::application::ports::enrollment_repository::{
    EnrollmentRepository, EnrollmentWriteError, NewEnrollment,
};
use crate::application::ports::program_repository::ProgramRepository;
use crate::domain::enrollment::Enrollment;

#[derive(Debug, thiserror::Error)]
pub enum EnrollClientError {
    #[error("client not found")]
    ClientNotFound,
    #[error("program not found")]
    ProgramNotFound,
    #[error("client is already enrolled in this program")]
    AlreadyEnrolled,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct EnrollClient<'a, C, P, E>
where
    C: ClientRepository + ?Sized,
    P: ProgramRepository + ?Sized,
    E: EnrollmentRepository + ?Sized,
{
    pub clients: &'a C,
    pub programs: &'a P,
    pub enrollments: &'a E,
}

impl<'a, C, P, E> EnrollClient<'a, C, P, E>
where
    C: ClientRepository + ?Sized,
    P: ProgramRepository + ?Sized,
    E: EnrollmentRepository + ?Sized,
{
    /// Resolves both parents, rejects an existing (client, program) pair and
    /// inserts the enrollment. The pre-check is advisory only: the storage
    /// uniqueness constraint is authoritative when two enroll calls race,
    /// and its violation maps to the same `AlreadyEnrolled` outcome.
    pub async fn execute(
        &self,
        client_id: Uuid,
        program_id: Uuid,
        enrollment_date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Result<Enrollment, EnrollClientError> {
        if self.clients.get_by_id(client_id).await?.is_none() {
            return Err(EnrollClientError::ClientNotFound);
        }
        if self.programs.get_by_id(program_id).await?.is_none() {
            return Err(EnrollClientError::ProgramNotFound);
        }
        if self
            .enrollments
            .find_by_client_and_program(client_id, program_id)
            .await?
            .is_some()
        {
            return Err(EnrollClientError::AlreadyEnrolled);
        }

        self.enrollments
            .insert(NewEnrollment {
                client_id,
                program_id,
                enrollment_date,
                status: None,
                notes,
            })
            .await
            .map_err(|e| match e {
                EnrollmentWriteError::Duplicate => EnrollClientError::AlreadyEnrolled,
                EnrollmentWriteError::Other(e) => EnrollClientError::Other(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::application::ports::client_repository::ClientFields;
    use crate::application::ports::enrollment_repository::{EnrollmentFields, EnrollmentFilter};
    use crate::domain::client::{Client, Gender};
    use crate::domain::enrollment;
    use crate::domain::program::HealthProgram;

    fn client(id: Uuid) -> Client {
        Client {
            id,
            first_name: "Jonas".into(),
            last_name: "Mensah".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1988, 3, 2).unwrap(),
            gender: Gender::Male,
            contact_number: "0244000000".into(),
            email: None,
            address: "4 Harbour St".into(),
            medical_history: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn program(id: Uuid) -> HealthProgram {
        HealthProgram {
            id,
            name: "TB Care".into(),
            description: "Tuberculosis treatment support".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct FixedClients(Vec<Client>);

    #[async_trait]
    impl ClientRepository for FixedClients {
        async fn list(
            &self,
            _search: Option<String>,
            _gender: Option<Gender>,
        ) -> anyhow::Result<Vec<Client>> {
            Ok(self.0.clone())
        }
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
            Ok(self.0.iter().find(|c| c.id == id).cloned())
        }
        async fn create(&self, _fields: ClientFields) -> anyhow::Result<Client> {
            unimplemented!()
        }
        async fn update(&self, _id: Uuid, _fields: ClientFields) -> anyhow::Result<Option<Client>> {
            unimplemented!()
        }
        async fn delete(&self, _id: Uuid) -> anyhow::Result<bool> {
            unimplemented!()
        }
    }

    struct FixedPrograms(Vec<HealthProgram>);

    #[async_trait]
    impl ProgramRepository for FixedPrograms {
        async fn list(&self, _search: Option<String>) -> anyhow::Result<Vec<HealthProgram>> {
            Ok(self.0.clone())
        }
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<HealthProgram>> {
            Ok(self.0.iter().find(|p| p.id == id).cloned())
        }
        async fn create(&self, _name: &str, _description: &str) -> anyhow::Result<HealthProgram> {
            unimplemented!()
        }
        async fn update(
            &self,
            _id: Uuid,
            _name: &str,
            _description: &str,
        ) -> anyhow::Result<Option<HealthProgram>> {
            unimplemented!()
        }
        async fn delete(&self, _id: Uuid) -> anyhow::Result<bool> {
            unimplemented!()
        }
    }

    struct MemEnrollments {
        rows: Mutex<Vec<Enrollment>>,
        // Forces the pre-check to miss, exercising the constraint-race path.
        blind_precheck: bool,
    }

    impl MemEnrollments {
        fn empty() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                blind_precheck: false,
            }
        }
    }

    #[async_trait]
    impl EnrollmentRepository for MemEnrollments {
        async fn list(&self, _filter: EnrollmentFilter) -> anyhow::Result<Vec<Enrollment>> {
            Ok(self.rows.lock().unwrap().clone())
        }
        async fn list_for_client(&self, client_id: Uuid) -> anyhow::Result<Vec<Enrollment>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.client_id == client_id)
                .cloned()
                .collect())
        }
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Enrollment>> {
            Ok(self.rows.lock().unwrap().iter().find(|e| e.id == id).cloned())
        }
        async fn find_by_client_and_program(
            &self,
            client_id: Uuid,
            program_id: Uuid,
        ) -> anyhow::Result<Option<Enrollment>> {
            if self.blind_precheck {
                return Ok(None);
            }
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.client_id == client_id && e.program_id == program_id)
                .cloned())
        }
        async fn insert(&self, new: NewEnrollment) -> Result<Enrollment, EnrollmentWriteError> {
            let mut rows = self.rows.lock().unwrap();
            if rows
                .iter()
                .any(|e| e.client_id == new.client_id && e.program_id == new.program_id)
            {
                return Err(EnrollmentWriteError::Duplicate);
            }
            let row = Enrollment {
                id: Uuid::new_v4(),
                client_id: new.client_id,
                program_id: new.program_id,
                program_name: "TB Care".into(),
                enrollment_date: new
                    .enrollment_date
                    .unwrap_or_else(|| Utc::now().date_naive()),
                status: new.status.unwrap_or_else(|| enrollment::DEFAULT_STATUS.into()),
                notes: new.notes,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            rows.push(row.clone());
            Ok(row)
        }
        async fn update(
            &self,
            _id: Uuid,
            _fields: EnrollmentFields,
        ) -> Result<Option<Enrollment>, EnrollmentWriteError> {
            unimplemented!()
        }
        async fn delete(&self, _id: Uuid) -> anyhow::Result<bool> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn enroll_creates_with_defaults() {
        let client_id = Uuid::new_v4();
        let program_id = Uuid::new_v4();
        let clients = FixedClients(vec![client(client_id)]);
        let programs = FixedPrograms(vec![program(program_id)]);
        let enrollments = MemEnrollments::empty();
        let uc = EnrollClient {
            clients: &clients,
            programs: &programs,
            enrollments: &enrollments,
        };

        let created = uc.execute(client_id, program_id, None, None).await.unwrap();
        assert_eq!(created.status, "Active");
        assert_eq!(created.enrollment_date, Utc::now().date_naive());
        assert_eq!(enrollments.list_for_client(client_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn enroll_missing_program_creates_nothing() {
        let client_id = Uuid::new_v4();
        let clients = FixedClients(vec![client(client_id)]);
        let programs = FixedPrograms(vec![]);
        let enrollments = MemEnrollments::empty();
        let uc = EnrollClient {
            clients: &clients,
            programs: &programs,
            enrollments: &enrollments,
        };

        let err = uc
            .execute(client_id, Uuid::new_v4(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EnrollClientError::ProgramNotFound));
        assert!(enrollments.list_for_client(client_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn enroll_missing_client_is_rejected() {
        let program_id = Uuid::new_v4();
        let clients = FixedClients(vec![]);
        let programs = FixedPrograms(vec![program(program_id)]);
        let enrollments = MemEnrollments::empty();
        let uc = EnrollClient {
            clients: &clients,
            programs: &programs,
            enrollments: &enrollments,
        };

        let err = uc
            .execute(Uuid::new_v4(), program_id, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EnrollClientError::ClientNotFound));
    }

    #[tokio::test]
    async fn second_enroll_for_same_pair_is_conflict() {
        let client_id = Uuid::new_v4();
        let program_id = Uuid::new_v4();
        let clients = FixedClients(vec![client(client_id)]);
        let programs = FixedPrograms(vec![program(program_id)]);
        let enrollments = MemEnrollments::empty();
        let uc = EnrollClient {
            clients: &clients,
            programs: &programs,
            enrollments: &enrollments,
        };

        uc.execute(client_id, program_id, None, None).await.unwrap();
        let err = uc
            .execute(client_id, program_id, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EnrollClientError::AlreadyEnrolled));
        assert_eq!(enrollments.list_for_client(client_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn store_duplicate_rejection_maps_to_conflict() {
        let client_id = Uuid::new_v4();
        let program_id = Uuid::new_v4();
        let clients = FixedClients(vec![client(client_id)]);
        let programs = FixedPrograms(vec![program(program_id)]);
        let enrollments = MemEnrollments {
            rows: Mutex::new(Vec::new()),
            blind_precheck: true,
        };
        let uc = EnrollClient {
            clients: &clients,
            programs: &programs,
            enrollments: &enrollments,
        };

        uc.execute(client_id, program_id, None, None).await.unwrap();
        // The pre-check sees nothing; only the insert-time rejection stops
        // the duplicate, as it would under concurrent enrolls.
        let err = uc
            .execute(client_id, program_id, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EnrollClientError::AlreadyEnrolled));
        assert_eq!(enrollments.list_for_client(client_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn explicit_date_and_notes_are_kept() {
        let client_id = Uuid::new_v4();
        let program_id = Uuid::new_v4();
        let clients = FixedClients(vec![client(client_id)]);
        let programs = FixedPrograms(vec![program(program_id)]);
        let enrollments = MemEnrollments::empty();
        let uc = EnrollClient {
            clients: &clients,
            programs: &programs,
            enrollments: &enrollments,
        };

        let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let created = uc
            .execute(client_id, program_id, Some(date), Some("referred".into()))
            .await
            .unwrap();
        assert_eq!(created.enrollment_date, date);
        assert_eq!(created.notes.as_deref(), Some("referred"));
    }
}
