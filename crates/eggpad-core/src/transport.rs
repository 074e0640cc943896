use crate::report::PadReport;

/// The link to the host, as seen by the playback engine.
///
/// Implementations own their error handling: a report handed to
/// [`PadTransport::deliver_report`] is retried until the host takes it,
/// so the caller never observes a failure.
pub trait PadTransport {
    /// Whether the host is currently accepting reports. While this is
    /// false no report is synthesized, so no frame elapses.
    fn can_deliver(&mut self) -> bool {
        true
    }

    fn deliver_report(&mut self, report: &PadReport);

    /// Runs pending bus work and drains whatever the host sent. Inbound
    /// data is discarded.
    fn service(&mut self);
}

impl<T: PadTransport + ?Sized> PadTransport for &mut T {
    fn can_deliver(&mut self) -> bool {
        (**self).can_deliver()
    }

    fn deliver_report(&mut self, report: &PadReport) {
        (**self).deliver_report(report)
    }

    fn service(&mut self) {
        (**self).service()
    }
}
