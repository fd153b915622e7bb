//! gitcd - jump to your git projects
//!
//! This library provides the project registry with its ranked queries, the
//! scanner that discovers git projects on disk, and the interactive pieces
//! used by the `gitcd` binary to pick a project and hand it to the shell.

pub mod config;
pub mod logging;
pub mod registry;
pub mod scan;
pub mod shell;
