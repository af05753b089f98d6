pub mod auth;
pub mod health;
pub mod index;
pub mod notifications;
pub mod progress;
pub mod tasks;
