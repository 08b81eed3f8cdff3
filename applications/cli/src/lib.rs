//! tunesync CLI
//!
//! Orchestrates one-shot sync runs between a local music collection and a
//! cloud music library account.
//!
//! The binary only parses arguments, loads configuration and authenticates;
//! everything a run decides lives in [`sync`] and is generic over
//! [`tunesync_core::RemoteLibrary`], so it is exercised in tests against an
//! in-memory library.

pub mod cli;
pub mod config;
pub mod error;
pub mod sync;

pub use config::AppConfig;
pub use error::{Result, SyncError};
