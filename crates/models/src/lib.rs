pub mod course;
pub mod period;

pub use course::{Course, CourseId, CourseInstance, InstanceKey, InvalidCourseId};
pub use period::{InvalidPeriod, Period, Semester, Year};
