//! # Allowlisted Shell Server
//!
//! Shell capability for the stdio JSON-RPC core. `shell/exec` runs a program
//! only if its name (and, where restricted, its first argument) appears in the
//! allowlist, inside the workspace, under a hard wall-clock timeout.
//! `shell/allowed` reports the allowlist.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod service;
