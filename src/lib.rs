pub mod config;
pub mod model;
pub mod queue;

pub use model::{Identified, Track};
pub use queue::{Queue, QueueEvent, QueueSnapshot};
