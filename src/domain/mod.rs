pub mod client;
pub mod enrollment;
pub mod program;
