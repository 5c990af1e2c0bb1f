//! Desktop notifications for phase completion.

use notify_rust::Notification;

use crate::session::Phase;

/// Alert capability invoked when a phase completes.
///
/// The controller calls this exactly once per completion event; any
/// repetition of the underlying alert is the sink's business.
pub trait NotificationSink {
    /// Announce that `phase` just finished.
    fn phase_completed(&mut self, phase: Phase);
}

/// Notification sink backed by the platform notification service.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl NotificationSink for DesktopNotifier {
    fn phase_completed(&mut self, phase: Phase) {
        let body = format!("{phase} finished");
        // Delivery is best effort; a missing notification daemon must
        // not take down the timer.
        let _ = Notification::new()
            .summary("Pomodoro")
            .body(&body)
            .show();
    }
}
