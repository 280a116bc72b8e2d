pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod categories;
pub mod comments;
pub mod content;
pub mod newsletter;
pub mod schedule;
