pub mod changes;
pub mod log;
pub mod review;

pub use changes::handle_changes;
pub use log::handle_log;
pub use review::{handle_review, ReviewArgs};
