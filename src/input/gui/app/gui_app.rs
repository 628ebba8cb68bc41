use crate::controllers::interactive::{Explorer, FrameAction, FrameInput};
use crate::input::gui::app::key_input::KeyInputState;
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use egui::Context;
use egui_winit::State as EguiWinitState;
use std::time::Duration;
use winit::event::WindowEvent;
use winit::event_loop::EventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::Window;

pub struct GuiApp<T: GuiPresenterPort> {
    width: u32,
    height: u32,
    pub scale_factor: f64,
    presenter: T,
    explorer: Explorer,
    keys: KeyInputState,
    cursor: Option<(f64, f64)>,
    pending_resize: Option<(u32, u32)>,
    last_preview_duration: Option<Duration>,
    last_error_message: Option<String>,
    pub egui_ctx: Context,
    pub egui_state: EguiWinitState,
}

impl<T: GuiPresenterPort> GuiApp<T> {
    pub fn new(
        window: &'static Window,
        event_loop: &EventLoop<()>,
        presenter: T,
        explorer: Explorer,
    ) -> Self {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let egui_ctx = Context::default();

        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(scale_factor as f32),
            None,
        );

        Self {
            width: size.width,
            height: size.height,
            scale_factor,
            presenter,
            explorer,
            keys: KeyInputState::default(),
            cursor: None,
            // The window may not have the configured size.
            pending_resize: Some((size.width, size.height)),
            last_preview_duration: None,
            last_error_message: None,
            egui_ctx,
            egui_state,
        }
    }

    /// Feeds everything collected since the last redraw to the explorer.
    pub fn advance(&mut self) {
        let text_editing = self.egui_ctx.wants_keyboard_input();
        let (held, commands) = self.keys.snapshot(text_editing);

        let input = FrameInput {
            cursor: self.cursor,
            commands,
            held,
            resize: self.pending_resize.take(),
        };

        match self.explorer.frame(&input) {
            Ok(FrameAction::FastPreview { elapsed, .. }) => {
                self.last_preview_duration = Some(elapsed);
                self.last_error_message = None;
            }
            Ok(_) => {}
            Err(err) => {
                log::error!("frame failed: {}", err);
                self.last_error_message = Some(err.to_string());
            }
        }
    }

    pub fn render(&mut self, egui_output: egui::FullOutput) -> Result<(), pixels::Error> {
        self.presenter
            .render(self.explorer.display(), egui_output, &self.egui_ctx)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        if width == 0 || height == 0 {
            return;
        }

        if let Err(err) = self.presenter.resize(width, height) {
            log::error!("failed to resize surface to {}x{}: {}", width, height, err);
            return;
        }

        self.pending_resize = Some((width, height));
    }

    pub fn update_ui(&mut self, window: &Window) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);
        let diagnostics = self.explorer.diagnostics();

        self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Diagnostics")
                .default_pos([10.0, 10.0])
                .default_size([280.0, 240.0])
                .show(ctx, |ui| {
                    ui.heading("Julia Explorer");
                    ui.separator();

                    for line in diagnostics.lines() {
                        ui.label(line);
                    }

                    ui.separator();
                    ui.label(format!("Window size: {}x{}", self.width, self.height));
                    if let Some(duration) = self.last_preview_duration {
                        ui.label(format!("Last preview: {} ms", duration.as_millis()));
                    }
                    if let Some(message) = &self.last_error_message {
                        ui.separator();
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                    }
                });
        })
    }

    /// Forwards the event to egui, then records keys and cursor for the next
    /// frame. Returns whether egui consumed the event.
    pub fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    self.keys
                        .handle_key_event(key_code, event.state, event.repeat);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x, position.y));
            }
            WindowEvent::Focused(false) => self.keys.reset(),
            _ => {}
        }

        response.consumed
    }
}
