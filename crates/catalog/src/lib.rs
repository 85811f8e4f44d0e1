//! Course catalog integrity and scheduling.
//!
//! [`CatalogService`] is what a front end talks to. It validates every
//! mutation with [`CatalogGuard`] against an in-process [`Catalog`] mirror,
//! forwards accepted changes to a [`CourseStore`], and derives views through
//! the [`query`] functions.

pub mod command;
pub mod error;
pub mod guard;
pub mod query;
pub mod repository;
pub mod service;
pub mod store;

pub use command::{CreateCourseCommand, CreateInstanceCommand};
pub use error::{CatalogError, CatalogResult, ErrorKind};
pub use guard::CatalogGuard;
pub use query::{InstanceFilter, PeriodGroup};
pub use repository::Catalog;
pub use service::CatalogService;
pub use store::{CourseStore, MemoryStore};
