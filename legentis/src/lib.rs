//! # Legentis
//!
//! **Legentis** is a lightweight async runtime for Rust centered on one job:
//! walking directories entry by entry without stalling the executor.
//!
//! Unlike general-purpose runtimes like Tokio or async-std, Legentis provides
//! only the primitives that job needs. It features a work-stealing
//! multi-threaded executor, a reactor for timers and descriptor readiness,
//! and a blocking pool that carries the filesystem calls no platform exposes
//! in a non-blocking form.
//!
//! Legentis is built from the ground up with simplicity in mind, offering:
//!
//! - **Directory enumeration** that yields one entry per call, with async
//!   and blocking forms over the same machinery
//! - **Async file and directory operations** for non-blocking filesystem access
//! - A **work-stealing scheduler** that distributes tasks efficiently across worker threads
//! - **Timer primitives** including sleep and timeout
//! - **Ergonomic macros** like `#[legentis::main]`, `#[legentis::test]`, `join!`, and `select!`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use legentis::fs::ReadDir;
//!
//! #[legentis::main]
//! async fn main() -> std::io::Result<()> {
//!     let mut dir = ReadDir::open("/tmp").await?;
//!
//!     while let Some(entry) = dir.next_entry().await? {
//!         println!("{} ({:?})", entry.name(), entry.kind());
//!     }
//!
//!     dir.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`fs`] — Directory enumeration, file and directory operations
//! - [`time`] — Timers, sleep, and timeout
//!
//! ## Getting Started
//!
//! Add Legentis to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! legentis = { git = "https://github.com/nebula-platform/legentis", package = "legentis" }
//! ```

mod reactor;
mod runtime;
mod utils;

pub mod fs;
pub mod time;

pub use runtime::blocking::unblock;
pub use runtime::builder::RuntimeBuilder;
pub use runtime::task;
pub use runtime::yield_now::yield_now;

pub use legentis_macros::*;
