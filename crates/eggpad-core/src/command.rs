use eggpad_common::Frames;

use crate::action::Action;

/// An action held for a fixed number of frames.
///
/// The duration counts report generation cycles, not wall-clock time:
/// reports go out at the pace the host polls the IN endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    pub action: Action,
    pub duration: Frames,
}

impl Command {
    pub const fn new(action: Action, duration: Frames) -> Self {
        Self { action, duration }
    }

    /// Idle for `duration` frames.
    pub const fn wait(duration: Frames) -> Self {
        Self::new(Action::Nothing, duration)
    }

    pub const fn is_noop(&self) -> bool {
        self.duration == 0
    }
}
