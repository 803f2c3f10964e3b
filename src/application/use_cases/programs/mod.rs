pub mod create_program;
pub mod delete_program;
pub mod get_program;
pub mod list_programs;
pub mod update_program;
