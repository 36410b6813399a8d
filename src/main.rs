//! hush: a calm terminal player for ambient relaxation tracks.

mod app;
mod catalog;
mod config;
mod engine;
mod error;
mod playback;
mod runtime;
mod transport;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
