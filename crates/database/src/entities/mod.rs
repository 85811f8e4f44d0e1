pub mod course;
pub mod instance;
pub mod prerequisite;
