//! Video Catalog Core Library
//!
//! Contains the video entity, the repository contract with its PostgreSQL
//! and in-memory implementations, and the database connection bootstrap.

pub mod connection;
pub mod domain;
pub mod error;
pub mod repository;

pub use error::{CoreError, Result};
