pub mod client_repository_sqlx;
pub mod enrollment_repository_sqlx;
pub mod program_repository_sqlx;
