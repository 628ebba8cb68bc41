use crate::core::scheduler::pass::PassProgress;
use std::fmt;
use std::time::Duration;

/// Progressive refinement state.
///
/// `Idle -> FastPreviewInFlight -> StableWait -> BackgroundRefineInFlight -> Idle`,
/// with any state returning to `FastPreviewInFlight` on invalidating input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPassState {
    #[default]
    Idle,
    FastPreviewInFlight,
    StableWait,
    BackgroundRefineInFlight,
}

impl fmt::Display for RenderPassState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::FastPreviewInFlight => "preview",
            Self::StableWait => "waiting",
            Self::BackgroundRefineInFlight => "refining",
        };
        f.write_str(name)
    }
}

/// What the controller did during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    Nothing,
    /// A blocking preview pass ran to completion this frame.
    FastPreview {
        progress: PassProgress,
        elapsed: Duration,
    },
    /// Queued work was dropped because only the sample count changed.
    QualityChanged { drained: usize },
    RefineLaunched { pass_id: u64, units: usize },
}
