// Library root
// -----------
// This crate exposes the pieces of the `smokeshow` CLI so the upload flow
// can be driven from tests as well as from `main.rs`.
//
// Module responsibilities:
// - `config`: settings read from the environment once at startup.
// - `api`: HTTP interactions with the hosting service (create a site,
//   upload one file).
// - `content`: content type lookup and size formatting.
// - `upload`: walks the directory and uploads every file concurrently.
// - `ui`: terminal output and the progress bar.
// - `app`: the end to end flow of one run.
pub mod api;
pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod ui;
pub mod upload;

pub use config::Config;
pub use error::{Error, Result};
