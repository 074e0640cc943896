use eggpad_common::{Frames, dev_info, dev_trace, dev_warn};

use crate::{
    action::Action,
    command::Command,
    synth::{PlaybackState, Synthesizer},
    transport::PadTransport,
};

/// Something able to play commands back, one at a time, to completion.
pub trait CommandRunner {
    fn run(&mut self, command: Command);

    /// Asks for a neutral pause before the next command takes effect.
    fn resync(&mut self) {}
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, command: Command) {
        (**self).run(command)
    }

    fn resync(&mut self) {
        (**self).resync()
    }
}

/// Drives a [`Synthesizer`] against a [`PadTransport`].
///
/// Each cycle synthesizes and delivers one report when the host accepts
/// it, then services the transport. [`CommandRunner::run`] blocks until
/// the command's duration elapsed, or returns early once playback was
/// finished, as no frame elapses after that.
pub struct Executor<T: PadTransport> {
    synth: Synthesizer,
    transport: T,
}

impl<T: PadTransport> Executor<T> {
    pub const fn new(transport: T) -> Self {
        Self::with_synthesizer(transport, Synthesizer::new())
    }

    pub const fn with_synthesizer(transport: T, synth: Synthesizer) -> Self {
        Self { synth, transport }
    }

    pub fn synthesizer(&self) -> &Synthesizer {
        &self.synth
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns whether the cycle counted as a frame of the command.
    #[inline]
    fn cycle(&mut self, action: Action) -> bool {
        let mut progressed = false;
        if self.transport.can_deliver() {
            let frame = self.synth.next_report(action);
            self.transport.deliver_report(&frame.report);
            progressed = frame.progressed;
        }

        self.transport.service();
        progressed
    }

    /// Ends playback and keeps the link alive forever, repeating the
    /// terminal report.
    pub fn idle_forever(&mut self) -> ! {
        dev_info!("Playback finished, idling");
        self.synth.finish();
        loop {
            self.cycle(Action::Nothing);
        }
    }
}

impl<T: PadTransport> CommandRunner for Executor<T> {
    fn run(&mut self, command: Command) {
        if command.is_noop() {
            return;
        }

        dev_trace!("Running {:?} for {} frames", command.action, command.duration);
        let mut frames: Frames = 0;
        while frames < command.duration {
            if self.synth.state() == PlaybackState::Done {
                dev_warn!("Dropping {:?}, playback already finished", command.action);
                return;
            }
            if self.cycle(command.action) {
                frames += 1;
            }
        }
    }

    fn resync(&mut self) {
        self.synth.resync();
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::report::PadReport;
    use std::vec::Vec;

    /// Accepts every report once `ready_after` services happened.
    #[derive(Default)]
    struct ScriptedTransport {
        ready_after: usize,
        delivered: Vec<PadReport>,
        services: usize,
    }

    impl PadTransport for ScriptedTransport {
        fn can_deliver(&mut self) -> bool {
            self.services >= self.ready_after
        }

        fn deliver_report(&mut self, report: &PadReport) {
            self.delivered.push(*report);
        }

        fn service(&mut self) {
            self.services += 1;
        }
    }

    fn count_of(reports: &[PadReport], action: Action) -> usize {
        let target = action.to_report();
        reports.iter().filter(|r| **r == target).count()
    }

    #[test]
    fn test_zero_duration_is_noop() {
        let mut exec = Executor::new(ScriptedTransport::default());
        exec.run(Command::new(Action::A, 0));

        assert!(exec.transport().delivered.is_empty());
        assert_eq!(exec.transport().services, 0);
        assert_eq!(exec.synthesizer().state(), PlaybackState::SyncController);
    }

    #[test]
    fn test_first_command_pays_for_sync() {
        let mut exec = Executor::new(ScriptedTransport::default());
        exec.run(Command::new(Action::A, 4));

        // Sync + breathe (each echoed twice), then 4 processed frames,
        // the last one with its echoes still pending.
        let t = exec.transport();
        assert_eq!(t.delivered.len(), 6 + 1 + 3 * 3);
        assert_eq!(t.services, t.delivered.len());
        assert!(t.delivered[..6].iter().all(PadReport::is_neutral));
        assert_eq!(count_of(&t.delivered, Action::A), 10);
        assert_eq!(exec.synthesizer().echo().pending(), 2);
    }

    #[test]
    fn test_duration_counts_processed_frames() {
        let mut exec = Executor::new(ScriptedTransport::default());
        exec.run(Command::new(Action::Nothing, 1));

        for duration in [1u16, 5, 37] {
            let before = exec.transport().delivered.len();
            exec.run(Command::new(Action::X, duration));
            let delivered = &exec.transport().delivered[before..];

            // Two echoes left over from the previous command, then one
            // fresh report plus two echoes per frame except the last.
            assert_eq!(delivered.len(), 3 * duration as usize);
            assert_eq!(count_of(&delivered[2..], Action::X), 3 * duration as usize - 2);
        }
    }

    #[test]
    fn test_not_ready_host_does_not_consume_frames() {
        let mut exec = Executor::new(ScriptedTransport {
            ready_after: 25,
            ..Default::default()
        });
        exec.run(Command::new(Action::B, 3));

        let t = exec.transport();
        assert_eq!(t.services, 25 + t.delivered.len());
        assert_eq!(t.delivered.len(), 6 + 1 + 3 * 2);
    }

    #[test]
    fn test_resync_delays_next_action() {
        let mut exec = Executor::new(ScriptedTransport::default());
        exec.run(Command::new(Action::A, 1));
        exec.resync();

        let before = exec.transport().delivered.len();
        exec.run(Command::new(Action::Y, 1));
        let delivered = &exec.transport().delivered[before..];

        // 2 pending echoes of A, sync (x3), breathe (x3), then Y.
        assert_eq!(delivered.len(), 2 + 6 + 1);
        assert!(delivered[2..8].iter().all(PadReport::is_neutral));
        assert_eq!(delivered[8], Action::Y.to_report());
    }

    #[test]
    fn test_run_after_finish_returns() {
        let mut exec = Executor::new(ScriptedTransport::default());
        exec.run(Command::new(Action::A, 1));
        exec.synth.finish();

        let before = exec.transport().delivered.len();
        exec.run(Command::new(Action::B, 5));
        let delivered = &exec.transport().delivered[before..];

        // Pending echoes of A, then the single cleanup frame.
        assert_eq!(delivered.len(), 2 + 1);
        assert!(delivered[2].is_neutral());
        assert_eq!(exec.synthesizer().state(), PlaybackState::Done);

        // Already done: nothing is delivered at all.
        exec.run(Command::new(Action::X, 3));
        assert_eq!(exec.transport().delivered.len(), before + 3);
    }
}
