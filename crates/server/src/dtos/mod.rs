pub mod course;
pub mod error;
pub mod instance;
