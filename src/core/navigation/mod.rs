pub mod controls;
pub mod limits;
pub mod navigator;

pub use controls::{HeldControls, ViewCommand};
pub use limits::NavigationLimits;
pub use navigator::{ViewChange, apply_command, apply_held, cursor_to_parameter};
