//! Hot-seat terminal front end: every seat plays from the same keyboard.

pub mod app;
pub mod controller;
pub mod ui;
