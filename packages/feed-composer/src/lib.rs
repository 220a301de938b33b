// Feed Composer - controller for the composer region of the social feed page
//
// Wires the composer controls to behavior: creating a post, highlighting the
// visibility dropdown, previewing a selected image, and the three direct
// delegations (file picker, modal, form submit).
//
// DOM handles and services are injected through the traits in kernel/, so the
// same controller runs in the browser (feature "web") and headless (feature "native").
// Browser build: `--no-default-features --features web` for wasm32-unknown-unknown.

pub mod composer;
pub mod config;
pub mod error;
pub mod kernel;
pub mod types;

#[cfg(feature = "web")]
pub mod web;

pub use composer::{ComposerElements, FeedComposer};
pub use config::*;
pub use error::ComposerError;
pub use types::*;
