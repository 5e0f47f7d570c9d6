//! Completion detector - one celebration per goal per session.

mod completion_detector;

pub use completion_detector::{Celebration, CompletionDetector};
