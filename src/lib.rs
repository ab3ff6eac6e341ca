//! Raging sea - animated ocean surface with a live tuning panel

pub mod camera;
pub mod cli;
pub mod config;
pub mod gui;
pub mod logging;
pub mod ocean;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod time;
pub mod viewport;
