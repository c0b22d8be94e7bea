pub mod categorize_cmd;

pub use categorize_cmd::{categorize, health};
