pub mod clients;
pub mod enrollments;
pub mod programs;
