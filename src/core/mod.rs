pub mod actions;
pub mod data;
pub mod fractals;
pub mod navigation;
pub mod raster;
pub mod scheduler;
pub mod util;
