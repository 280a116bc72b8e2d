//! Response shapes of the JSON API that differ from the domain records.

pub mod categories;
pub mod comments;
pub mod newsletter;
