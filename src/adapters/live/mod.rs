//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;
pub mod renderer;
pub mod tracker;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
pub use renderer::PngChartRenderer;
pub use tracker::LiveIssueSearch;
