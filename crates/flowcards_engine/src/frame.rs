// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cancellable self-re-arming frame task.

use crate::host::{CarouselHost, FrameHandle};

/// A recurring per-frame task.
///
/// Holds at most one pending frame request. The owner re-arms it after
/// every fired frame; [`FrameTask::cancel`] gives the pending request back
/// to the host so nothing fires afterwards.
#[derive(Debug, Default)]
pub struct FrameTask {
    pending: Option<FrameHandle>,
    fired: u64,
}

impl FrameTask {
    /// Create an idle task
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame request is pending
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of frames this task has accepted
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Request the next frame unless one is already pending.
    ///
    /// Returns whether the task is armed afterwards; a host without frame
    /// scheduling leaves it idle.
    pub fn start(&mut self, host: &mut impl CarouselHost) -> bool {
        if self.pending.is_none() {
            self.pending = host.request_frame();
            if let Some(handle) = self.pending {
                tracing::trace!(frame = handle.0, "frame requested");
            }
        }
        self.pending.is_some()
    }

    /// Cancel the pending frame, if any
    pub fn cancel(&mut self, host: &mut impl CarouselHost) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
            tracing::trace!(frame = handle.0, "frame cancelled");
        }
    }

    /// Accept a fired frame.
    ///
    /// Only the currently pending handle is accepted; a stale or foreign
    /// handle returns `false` and leaves the task untouched.
    pub fn accept(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            self.fired += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ManualHost, NullHost};

    #[test]
    fn test_start_is_idempotent() {
        let mut host = ManualHost::new();
        let mut task = FrameTask::new();
        assert!(task.start(&mut host));
        assert!(task.start(&mut host));
        assert_eq!(host.pending_frame_count(), 1);
    }

    #[test]
    fn test_accept_and_rearm() {
        let mut host = ManualHost::new();
        let mut task = FrameTask::new();
        task.start(&mut host);

        let frame = host.take_frame().unwrap();
        assert!(task.accept(frame));
        assert!(!task.is_armed());
        assert!(!task.accept(frame));
        assert_eq!(task.fired(), 1);

        task.start(&mut host);
        assert_eq!(host.pending_frame_count(), 1);
    }

    #[test]
    fn test_cancel_releases_pending_frame() {
        let mut host = ManualHost::new();
        let mut task = FrameTask::new();
        task.start(&mut host);
        let stale = host.pending_frames().next().unwrap();

        task.cancel(&mut host);
        assert!(!task.is_armed());
        assert_eq!(host.pending_frame_count(), 0);
        assert!(!task.accept(stale));
    }

    #[test]
    fn test_null_host_never_arms() {
        let mut task = FrameTask::new();
        assert!(!task.start(&mut NullHost));
        task.cancel(&mut NullHost);
        assert!(!task.is_armed());
    }
}
