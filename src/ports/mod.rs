//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the reporting core and an
//! external system (time, filesystem, tracker search, chart output).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod renderer;
pub mod tracker;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use renderer::{Chart, ChartKind, ChartRenderer, LineSeries};
pub use tracker::{IssueSearch, SearchFuture, SearchPage, SearchRequest};
