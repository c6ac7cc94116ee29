// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Slate - Main Entry Point
//!
//! A small tabbed text editor with split, compare and markdown preview panes.
//! Built with Rust and egui.

mod app;
mod bridge;
mod commands;
mod config;
mod editor;
mod error;
mod markdown;
mod state;
mod theme;
mod ui;
mod view;

use app::{SlateApp, APP_NAME};
use config::Settings;
use log::info;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let window_size = Settings::default().sanitized().window_size;
    info!(
        "Window configuration: {}x{}",
        window_size.width, window_size.height
    );

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([400.0, 300.0]);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(SlateApp::new(cc)))),
    )
}
