//! Domain records and the pure logic that operates on them.

pub mod article;
pub mod category;
pub mod comment;
pub mod publication;
pub mod recipe;
pub mod schedule;
pub mod subscriber;
pub mod tree;
pub mod types;
