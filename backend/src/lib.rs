//! Dovecote backend: session-authenticated 1:1 direct messaging over
//! WebSockets, with durable message history in PostgreSQL.
//!
//! The HTML frontend is a separate application; this crate serves JSON
//! view-models, the auth endpoints, and the realtime gateway at `/ws`.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod state;
pub mod types;
pub mod utils;
pub mod validation;
