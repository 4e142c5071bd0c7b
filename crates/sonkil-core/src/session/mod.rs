mod tracker;

pub use tracker::{Advance, SessionProgress, SessionTracker};
