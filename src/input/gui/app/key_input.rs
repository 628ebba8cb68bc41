use crate::core::navigation::{HeldControls, ViewCommand};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Discrete command bound to a key, fired once per press.
#[must_use]
pub fn command_for(key_code: KeyCode) -> Option<ViewCommand> {
    let command = match key_code {
        KeyCode::Equal => ViewCommand::DoubleIterations,
        KeyCode::Minus => ViewCommand::HalveIterations,
        KeyCode::KeyM => ViewCommand::ToggleMode,
        KeyCode::KeyR => ViewCommand::Reset,
        KeyCode::AltLeft => ViewCommand::MultiplySamples,
        KeyCode::ControlLeft => ViewCommand::DivideSamples,
        KeyCode::BracketRight => ViewCommand::NextBatchWidth,
        KeyCode::BracketLeft => ViewCommand::PreviousBatchWidth,
        KeyCode::KeyH => ViewCommand::ToggleOverlay,
        _ => return None,
    };
    Some(command)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyInputState {
    held: HeldControls,
    pending: Vec<ViewCommand>,
}

impl KeyInputState {
    pub fn handle_key_event(&mut self, key_code: KeyCode, state: ElementState, repeat: bool) {
        let pressed = state == ElementState::Pressed;

        match key_code {
            KeyCode::KeyW => self.held.pan_up = pressed,
            KeyCode::KeyA => self.held.pan_left = pressed,
            KeyCode::KeyS => self.held.pan_down = pressed,
            KeyCode::KeyD => self.held.pan_right = pressed,
            KeyCode::Space => self.held.zoom_in = pressed,
            KeyCode::ShiftLeft => self.held.zoom_out = pressed,
            _ => {
                if pressed && !repeat {
                    self.pending.extend(command_for(key_code));
                }
            }
        }
    }

    /// Held keys and the commands pressed since the last snapshot.
    ///
    /// While egui has keyboard focus the view sees no input and pending
    /// presses are dropped.
    pub fn snapshot(&mut self, text_editing: bool) -> (HeldControls, Vec<ViewCommand>) {
        let commands = std::mem::take(&mut self.pending);

        if text_editing {
            return (HeldControls::default(), Vec::new());
        }

        (self.held, commands)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
