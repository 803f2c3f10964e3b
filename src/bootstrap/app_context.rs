use std::sync::Arc;

use crate::application::ports::client_repository::ClientRepository;
use crate::application::ports::enrollment_repository::EnrollmentRepository;
use crate::application::ports::program_repository::ProgramRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    program_repo: Arc<dyn ProgramRepository>,
    client_repo: Arc<dyn ClientRepository>,
    enrollment_repo: Arc<dyn EnrollmentRepository>,
}

impl AppServices {
    pub fn new(
        program_repo: Arc<dyn ProgramRepository>,
        client_repo: Arc<dyn ClientRepository>,
        enrollment_repo: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            program_repo,
            client_repo,
            enrollment_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn program_repo(&self) -> Arc<dyn ProgramRepository> {
        self.services.program_repo.clone()
    }

    pub fn client_repo(&self) -> Arc<dyn ClientRepository> {
        self.services.client_repo.clone()
    }

    pub fn enrollment_repo(&self) -> Arc<dyn EnrollmentRepository> {
        self.services.enrollment_repo.clone()
    }
}
