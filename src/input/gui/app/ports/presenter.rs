use crate::core::data::pixel_buffer::PixelBuffer;
use egui::Context as EguiContext;

pub trait GuiPresenterPort {
    fn render(
        &mut self,
        display: &PixelBuffer,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
    ) -> Result<(), pixels::Error>;
    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError>;
}
