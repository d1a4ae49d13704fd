pub mod discover;
pub mod progress;
