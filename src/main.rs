/*
 * Responsibility
 * - tokio runtime entry
 * - app::run() only (no logic here)
 */
use anyhow::Result;

mod api;
mod app;
mod config;
mod error;
mod middleware;
mod services;
mod state;
#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
