//! Software rasterization onto [`PixelBuffer`](crate::core::data::pixel_buffer::PixelBuffer).
//!
//! Every primitive clips silently against the canvas and writes through
//! `&self`, so primitives may be drawn from parallel tasks.

pub mod arrow;
pub mod circle;
pub mod line;
pub mod rect;
pub mod triangle;
