mod adapters;
mod controllers;
mod core;
#[cfg(feature = "gui")]
mod input;
#[cfg(feature = "gui")]
mod presenters;

pub use crate::adapters::pixel_format::{PixelFormatError, copy_colours_to_rgba};
pub use crate::controllers::interactive::{
    Diagnostics, Explorer, ExplorerConfig, FrameAction, FrameInput, Overlay, RenderConfig,
    RenderController, RenderControllerError, RenderPassState,
};
pub use crate::core::data::canvas::{Canvas, CanvasError};
pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
pub use crate::core::data::view_state::ViewState;
pub use crate::core::fractals::fractal_kinds::FractalKinds;
pub use crate::core::navigation::{HeldControls, NavigationLimits, ViewChange, ViewCommand};

#[cfg(feature = "gui")]
pub use crate::input::gui::commands::run_gui::RunGuiCommand;
#[cfg(feature = "gui")]
pub use crate::presenters::pixels::factory::PixelsPresenterFactory;
