pub mod create_enrollment;
pub mod delete_enrollment;
pub mod get_enrollment;
pub mod list_enrollments;
pub mod update_enrollment;
