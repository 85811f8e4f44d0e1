pub mod convert;
pub mod course;
pub mod instance;
