pub mod client_repository;
pub mod enrollment_repository;
pub mod program_repository;
