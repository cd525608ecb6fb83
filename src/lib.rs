//! paramgrid: live grid editing for INI parameter files.
//!
//! The crate is the data and synchronization core behind a tabbed parameter
//! editor: an ordered document model for `key=value` sections, a forgiving
//! INI codec, content fingerprinting for cheap change detection, a diff
//! classifier that separates value-only updates from structural rebuilds, and
//! a per-file session that reconciles local edits with concurrent external
//! writes. The presentation layer sits outside: it forwards edit requests and
//! poll ticks, and renders whatever the session reports back.

pub mod codec;
pub mod config;
pub mod diff;
pub mod document;
pub mod fingerprint;
pub mod session;
pub mod state_store;
