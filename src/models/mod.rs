//! Diesel row types and their conversions to domain records.

pub mod article;
pub mod category;
pub mod comment;
#[cfg(feature = "server")]
pub mod config;
pub mod publication;
pub mod recipe;
pub mod subscriber;
