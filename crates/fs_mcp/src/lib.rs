//! # Workspace Filesystem Server
//!
//! Filesystem capability for the stdio JSON-RPC core: `fs/list`, `fs/read`,
//! `fs/write`, `fs/search`, `fs/exists` and `fs/mkdir`, every one of them
//! confined to a single workspace root.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod service;
