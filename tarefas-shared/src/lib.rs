//! # Tarefas Shared Library
//!
//! This crate contains the stores and authentication primitives shared by the
//! Tarefas web server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: database models and their queries (users, tasks)
//! - `auth`: password hashing and session tokens
//! - `db`: SQLite connection pool and embedded migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the tarefas shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
