//! Interactive exploration: input in, composed frames out.
//!
//! The host feeds one [`FrameInput`] per displayed frame to an [`Explorer`],
//! then shows [`Explorer::display`] and the [`Diagnostics`] text. Rendering
//! runs on the controller's worker pool; nothing here blocks on a refine.

mod controller;
pub mod data;
mod explorer;
mod overlay;
mod types;

pub use controller::{RenderController, RenderControllerError};
pub use data::diagnostics::Diagnostics;
pub use data::explorer_config::ExplorerConfig;
pub use data::frame_input::FrameInput;
pub use data::render_config::RenderConfig;
pub use explorer::Explorer;
pub use overlay::Overlay;
pub use types::{FrameAction, RenderPassState};
