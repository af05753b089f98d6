pub mod notifications;
pub mod progress;
pub mod tasks;
