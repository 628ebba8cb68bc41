use crate::controllers::interactive::{Explorer, ExplorerConfig};
use crate::input::gui::app::gui_app::GuiApp;
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::commands::ports::presenter_factory::GuiPresenterFactoryPort;
use std::marker::PhantomData;
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    config: ExplorerConfig,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    pub fn new(presenter_factory: F, config: ExplorerConfig) -> Self {
        Self {
            presenter_factory,
            config,
            _phantom: PhantomData,
        }
    }

    /// Opens the window and redraws continuously until it is closed.
    pub fn execute(&self) {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title("Julia Explorer")
                .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
                .with_min_inner_size(PhysicalSize::new(200, 200))
                .build(&event_loop)
                .expect("Failed to create window"),
        ));

        let presenter = self
            .presenter_factory
            .build(window)
            .expect("Failed to create pixels surface");
        let explorer = Explorer::new(self.config).expect("Failed to start renderer");
        let mut app = GuiApp::new(window, &event_loop, presenter, explorer);

        // The render controller counts frames, so redraw without waiting.
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run(move |event, elwt| match event {
                Event::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == window.id() => {
                    app.handle_window_event(window, event);

                    match event {
                        WindowEvent::CloseRequested => {
                            elwt.exit();
                        }
                        WindowEvent::RedrawRequested => {
                            let egui_output = app.update_ui(window);
                            app.advance();

                            app.egui_state
                                .handle_platform_output(window, egui_output.platform_output.clone());

                            if let Err(e) = app.render(egui_output) {
                                log::error!("render error: {e}");
                                elwt.exit();
                            }
                        }
                        WindowEvent::Resized(size) => {
                            app.resize(size.width, size.height);
                        }
                        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                            app.scale_factor = *scale_factor;
                            app.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                            let size = window.inner_size();
                            app.resize(size.width, size.height);
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            })
            .expect("Event loop error");
    }
}
