use eggpad_common::dev_debug;

use crate::{action::Action, report::PadReport};

/// Number of times every freshly synthesized report is sent again before
/// a new one is computed. The host drops inputs that do not stay stable
/// for a few polls.
pub const DEFAULT_ECHOES: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    SyncController,
    SyncPosition,
    Breathe,
    Process,
    Cleanup,
    Done,
}

/// Holds the last synthesized report and how many more times it has to
/// be repeated.
#[derive(Clone, Copy, Debug)]
pub struct EchoBuffer {
    last: PadReport,
    remaining: u8,
}

impl EchoBuffer {
    pub const fn new() -> Self {
        Self {
            last: PadReport::NEUTRAL,
            remaining: 0,
        }
    }

    #[inline]
    pub fn last(&self) -> &PadReport {
        &self.last
    }

    #[inline]
    pub fn pending(&self) -> u8 {
        self.remaining
    }

    #[inline]
    fn take(&mut self) -> Option<PadReport> {
        if self.remaining > 0 {
            self.remaining -= 1;
            Some(self.last)
        } else {
            None
        }
    }

    #[inline]
    fn store(&mut self, report: PadReport, echoes: u8) {
        self.last = report;
        self.remaining = echoes;
    }
}

/// Output of a single synthesis step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub report: PadReport,
    /// Set when this frame counts towards the duration of the active
    /// command. Only frames produced in [`PlaybackState::Process`] do.
    pub progressed: bool,
}

/// Turns the active action into one report per frame.
///
/// Every new report is followed by `echoes` verbatim copies. A command
/// only takes effect after the machine went through the neutral sync
/// and breathe frames; from then on it stays in
/// [`PlaybackState::Process`] for the rest of the run.
pub struct Synthesizer {
    state: PlaybackState,
    echo: EchoBuffer,
    echoes: u8,
}

impl Synthesizer {
    pub const fn new() -> Self {
        Self::with_echoes(DEFAULT_ECHOES)
    }

    pub const fn with_echoes(echoes: u8) -> Self {
        Self {
            state: PlaybackState::SyncController,
            echo: EchoBuffer::new(),
            echoes,
        }
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn echo(&self) -> &EchoBuffer {
        &self.echo
    }

    /// Forces a neutral frame followed by a breathe frame before the
    /// next action takes effect. Has no effect once playback finished.
    pub fn resync(&mut self) {
        if !matches!(self.state, PlaybackState::Cleanup | PlaybackState::Done) {
            dev_debug!("Resyncing playback from {:?}", self.state);
            self.state = PlaybackState::SyncPosition;
        }
    }

    /// Leaves the processing loop. After one more frame the machine is
    /// [`PlaybackState::Done`] and keeps repeating the last report.
    pub fn finish(&mut self) {
        if self.state != PlaybackState::Done {
            self.state = PlaybackState::Cleanup;
        }
    }

    pub fn next_report(&mut self, action: Action) -> Frame {
        if let Some(report) = self.echo.take() {
            return Frame {
                report,
                progressed: false,
            };
        }

        let mut report = PadReport::NEUTRAL;
        let mut progressed = false;

        match self.state {
            PlaybackState::SyncController | PlaybackState::SyncPosition => {
                self.state = PlaybackState::Breathe;
            }
            PlaybackState::Breathe => {
                self.state = PlaybackState::Process;
            }
            PlaybackState::Process => {
                action.apply(&mut report);
                progressed = true;
            }
            PlaybackState::Cleanup => {
                self.state = PlaybackState::Done;
            }
            PlaybackState::Done => {
                return Frame {
                    report: *self.echo.last(),
                    progressed: false,
                };
            }
        }

        self.echo.store(report, self.echoes);
        Frame { report, progressed }
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    fn processing() -> Synthesizer {
        let mut synth = Synthesizer::with_echoes(0);
        synth.next_report(Action::Nothing);
        synth.next_report(Action::Nothing);
        assert_eq!(synth.state(), PlaybackState::Process);
        synth
    }

    #[test]
    fn test_startup_goes_through_sync_and_breathe() {
        let mut synth = Synthesizer::with_echoes(0);
        assert_eq!(synth.state(), PlaybackState::SyncController);

        let frame = synth.next_report(Action::A);
        assert!(frame.report.is_neutral());
        assert!(!frame.progressed);
        assert_eq!(synth.state(), PlaybackState::Breathe);

        let frame = synth.next_report(Action::A);
        assert!(frame.report.is_neutral());
        assert!(!frame.progressed);
        assert_eq!(synth.state(), PlaybackState::Process);

        let frame = synth.next_report(Action::A);
        assert_eq!(frame.report, Action::A.to_report());
        assert!(frame.progressed);
        assert_eq!(synth.state(), PlaybackState::Process);
    }

    #[test]
    fn test_process_is_deterministic() {
        let mut synth = processing();
        for action in Action::ALL {
            let first = synth.next_report(action);
            let second = synth.next_report(action);
            assert_eq!(first, second);
            assert_eq!(first.report, action.to_report());
        }
    }

    #[test]
    fn test_echoes_repeat_verbatim() {
        let mut synth = Synthesizer::new();
        // Sync and breathe frames are echoed too.
        let frames: Vec<Frame> = (0..6).map(|_| synth.next_report(Action::B)).collect();
        assert!(frames.iter().all(|f| f.report.is_neutral() && !f.progressed));
        assert_eq!(synth.state(), PlaybackState::Process);

        let fresh = synth.next_report(Action::B);
        assert!(fresh.progressed);
        assert_eq!(synth.echo().pending(), DEFAULT_ECHOES);

        // The action changes but the echoes still carry the old report,
        // and the state machine is not consulted.
        for remaining in (0..DEFAULT_ECHOES).rev() {
            let echo = synth.next_report(Action::Up);
            assert_eq!(echo.report, fresh.report);
            assert!(!echo.progressed);
            assert_eq!(synth.echo().pending(), remaining);
        }

        let next = synth.next_report(Action::Up);
        assert_eq!(next.report, Action::Up.to_report());
        assert!(next.progressed);
    }

    #[test]
    fn test_resync_inserts_neutral_frames() {
        let mut synth = processing();
        synth.resync();
        assert_eq!(synth.state(), PlaybackState::SyncPosition);

        assert!(synth.next_report(Action::X).report.is_neutral());
        assert_eq!(synth.state(), PlaybackState::Breathe);
        assert!(synth.next_report(Action::X).report.is_neutral());
        assert_eq!(synth.next_report(Action::X).report, Action::X.to_report());
    }

    #[test]
    fn test_done_repeats_last_report() {
        let mut synth = processing();
        synth.next_report(Action::Home);
        synth.finish();
        assert_eq!(synth.state(), PlaybackState::Cleanup);

        let cleanup = synth.next_report(Action::Home);
        assert!(cleanup.report.is_neutral());
        assert_eq!(synth.state(), PlaybackState::Done);

        for action in Action::ALL {
            let frame = synth.next_report(action);
            assert!(frame.report.is_neutral());
            assert!(!frame.progressed);
        }
        assert_eq!(synth.state(), PlaybackState::Done);

        synth.resync();
        assert_eq!(synth.state(), PlaybackState::Done);
    }
}
