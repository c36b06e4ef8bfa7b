//! Core types for calgen.
//!
//! This crate turns a handful of parameters into ordered lists of calendar
//! event descriptors and replays those lists against a calendar backend:
//! - `generate` holds the anniversary, memorial and biweekly generators
//! - `holiday` filters generated sequences against a public-holiday source
//! - `register` and `delete` drive a `CalendarStore` one call at a time
//!
//! Backends (Google Calendar, holiday calendars, token storage) live in
//! provider crates and plug in through the traits in `store`, `holiday`
//! and `identity`.

pub mod config;
pub mod date;
pub mod delete;
pub mod error;
pub mod event;
pub mod fakes;
pub mod generate;
pub mod holiday;
pub mod identity;
pub mod progress;
pub mod register;
pub mod store;

pub use error::{CalGenError, CalGenResult, ErrorKind};
pub use event::{EventDescriptor, EventTime, RemoteEvent};
