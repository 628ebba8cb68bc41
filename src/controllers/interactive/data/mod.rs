pub mod diagnostics;
pub mod explorer_config;
pub mod frame_input;
pub mod render_config;
