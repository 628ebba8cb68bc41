use crate::controllers::interactive::controller::{RenderController, RenderControllerError};
use crate::controllers::interactive::data::diagnostics::Diagnostics;
use crate::controllers::interactive::data::explorer_config::ExplorerConfig;
use crate::controllers::interactive::data::frame_input::FrameInput;
use crate::controllers::interactive::overlay::Overlay;
use crate::controllers::interactive::types::FrameAction;
use crate::core::actions::render_band::render_band::EscapeTimeBandRenderer;
use crate::core::data::canvas::Canvas;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::view_state::ViewState;
use crate::core::navigation::{
    HeldControls, NavigationLimits, ViewChange, ViewCommand, apply_command, apply_held,
    cursor_to_parameter,
};
use crate::core::scheduler::ports::unit_executor::UnitExecutor;

/// One interactive session: the view, its renderer, and the composed frame
/// the host puts on screen.
pub struct Explorer<E: UnitExecutor = EscapeTimeBandRenderer> {
    view: ViewState,
    controller: RenderController<E>,
    limits: NavigationLimits,
    overlay_enabled: bool,
    held: HeldControls,
    display: PixelBuffer,
}

impl Explorer<EscapeTimeBandRenderer> {
    pub fn new(config: ExplorerConfig) -> Result<Self, RenderControllerError> {
        Self::with_executor(EscapeTimeBandRenderer, config)
    }
}

impl<E: UnitExecutor> Explorer<E> {
    pub fn with_executor(executor: E, config: ExplorerConfig) -> Result<Self, RenderControllerError> {
        let canvas = Canvas::new(config.width, config.height)?;
        let controller = RenderController::with_executor(executor, canvas, config.render)?;

        log::info!(
            "explorer ready: {}x{} on {} render workers",
            canvas.width(),
            canvas.height(),
            controller.worker_count()
        );

        Ok(Self {
            view: ViewState::default(),
            controller,
            limits: config.limits,
            overlay_enabled: config.overlay_enabled,
            held: HeldControls::default(),
            display: PixelBuffer::new(canvas),
        })
    }

    /// Applies one frame of input, advances the renderer and recomposes the
    /// display buffer.
    pub fn frame(&mut self, input: &FrameInput) -> Result<FrameAction, RenderControllerError> {
        if let Some((width, height)) = input.resize {
            self.resize(width, height);
        }

        let previous = self.view;

        if let Some((x, y)) = input.cursor {
            self.view.cursor = cursor_to_parameter(x, y, self.controller.canvas());
        }

        for &command in &input.commands {
            self.apply(command);
        }

        self.held = input.held;
        apply_held(&mut self.view, input.held, &self.limits);

        let change = ViewChange::between(&previous, &self.view);
        let action = self.controller.on_frame(&self.view, change)?;

        self.compose()?;

        Ok(action)
    }

    fn resize(&mut self, width: u32, height: u32) {
        let canvas = match Canvas::new(width, height) {
            Ok(canvas) => canvas,
            Err(err) => {
                // Minimised windows report a zero size; keep the last frame.
                log::debug!("ignoring resize: {}", err);
                return;
            }
        };

        if canvas == self.controller.canvas() {
            return;
        }

        self.controller.resize(canvas);
        self.display = PixelBuffer::new(canvas);
    }

    fn apply(&mut self, command: ViewCommand) {
        apply_command(&mut self.view, command, &self.limits);

        match command {
            ViewCommand::NextBatchWidth => {
                let width = self.controller.batch_widths_mut().next();
                log::info!("batch width {}", width);
            }
            ViewCommand::PreviousBatchWidth => {
                let width = self.controller.batch_widths_mut().previous();
                log::info!("batch width {}", width);
            }
            ViewCommand::Reset => self.controller.batch_widths_mut().reset(),
            ViewCommand::ToggleOverlay => self.overlay_enabled = !self.overlay_enabled,
            _ => {}
        }
    }

    fn compose(&self) -> Result<(), RenderControllerError> {
        self.display.copy_from(self.controller.target())?;

        if self.overlay_enabled {
            Overlay {
                refine_progress: self.controller.refine_progress().map(|p| p.fraction()),
                pan_heading: self.held.pan_heading(),
            }
            .draw(&self.display);
        }

        Ok(())
    }

    /// The last composed frame: the render target plus any overlay.
    #[must_use]
    pub fn display(&self) -> &PixelBuffer {
        &self.display
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn controller(&self) -> &RenderController<E> {
        &self.controller
    }

    #[must_use]
    pub fn overlay_enabled(&self) -> bool {
        self.overlay_enabled
    }

    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        let controller = &self.controller;
        let batch_width = controller.batch_widths().current();

        let refine = match (controller.refine_progress(), controller.refine_elapsed()) {
            (Some(progress), Some(elapsed)) => format!(
                "refine: {:.0}% after {:.2?}",
                progress.fraction() * 100.0,
                elapsed
            ),
            (_, Some(elapsed)) => format!("refine: done in {:.2?}", elapsed),
            (_, None) => "refine: pending".to_string(),
        };

        Diagnostics {
            cursor: format!("c = {:.4}", self.view.cursor),
            offset: format!("centre = {:.6}", self.view.offset),
            zoom: format!("zoom: {:.3}x", self.view.zoom),
            iterations: format!("{} iterations", self.view.max_iterations),
            samples: format!("{} samples per pixel", self.view.sample_count),
            batch_width: format!(
                "batch width: {} px ({} units)",
                batch_width,
                controller.canvas().width() / batch_width
            ),
            jobs: format!(
                "jobs: {} active, {} queued, {} workers",
                controller.active_jobs(),
                controller.queued_jobs(),
                controller.worker_count()
            ),
            refine,
            state: format!("{} ({})", controller.state(), self.view.mode),
        }
    }
}
