//! vigil: a searchable terminal reader for scam and threat awareness articles.
//!
//! Articles are markdown documents cut into sections at their headings. The
//! [`search`] module holds the matching and highlighting logic, [`session`]
//! the state of one open search, and [`app_state`] ties both to the reader.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod error;
pub mod formats;
pub mod input;
pub mod library;
pub mod search;
pub mod section;
pub mod session;
pub mod theme;
pub mod ui;

pub use error::{Error, Result};
