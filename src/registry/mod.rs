//! # Project Registry
//!
//! The set of git projects gitcd knows about, how often each one has been
//! jumped to, and the ranked queries answered from it.
//!
//! ## Lifecycle
//!
//! A [`Registry`] is opened once per invocation from the database file
//! (created empty if missing), mutated by scans, cleanups and selections,
//! and flushed once on the way out. [`Registry::flush`] only rewrites the
//! file when something actually changed.
//!
//! ## Ranking
//!
//! Every list is ordered by usage count (highest first) and then by path,
//! so equal counts always come back in the same order.
//!
//! ## Concurrency
//!
//! There is no locking. Two gitcd processes running at the same time each
//! read the file at start and rewrite it at exit; the last one to exit wins.
//!
//! ## Data Format
//!
//! ```text
//! /home/user/code/gitcd;42
//! /home/user/code/dotfiles;3
//! ```

mod codec;
mod error;
mod query;
mod store;

pub use codec::{decode_line, encode_record, MalformedRecord, FIELD_SEPARATOR};
pub use error::RegistryError;
pub use query::{compose_expression, rank, DEFAULT_TOP_N, TERM_SEPARATOR};
pub use store::{Project, Registry, RegistryOptions};
