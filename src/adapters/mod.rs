//! Port implementations.
//!
//! `live` talks to real systems, `recording` wraps a live adapter and
//! captures its traffic to a cassette, `replaying` serves a cassette back.

pub mod live;
pub mod recording;
pub mod replaying;
