use crate::controllers::interactive::data::render_config::RenderConfig;
use crate::core::navigation::limits::NavigationLimits;

pub const DEFAULT_CANVAS_WIDTH: u32 = 1440;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 720;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerConfig {
    pub width: u32,
    pub height: u32,
    pub render: RenderConfig,
    pub limits: NavigationLimits,
    pub overlay_enabled: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            render: RenderConfig::default(),
            limits: NavigationLimits::default(),
            overlay_enabled: true,
        }
    }
}
