//! GUI input adapter for interactive fractal exploration.
//!
//! winit owns the window and the event loop, pixels the framebuffer, and
//! egui the diagnostics HUD. Keyboard and cursor events are collected into
//! one `FrameInput` per redraw.

pub mod app;
pub mod commands;
