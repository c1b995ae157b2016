// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host environment primitives the engine schedules work through.
//!
//! The engine never owns a clock or an input surface. It asks its host for
//! the next display frame and for interaction-surface-wide gesture
//! listeners, and gives both back through the same host.

use std::collections::BTreeSet;

/// Handle of one requested display frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Handle of one global gesture listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerHandle(pub u64);

/// Scheduling and input primitives supplied by the embedding environment.
///
/// Every method may be a no-op: a host without animation frames or global
/// listeners (a pre-render pass, for instance) returns `None` and the
/// engine stays static.
pub trait CarouselHost {
    /// Whether this host can deliver display frames at all.
    ///
    /// A host without them gets the static placeholder instead of a live strip.
    fn has_frame_primitives(&self) -> bool {
        true
    }

    /// Request a callback on the next display frame
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Cancel a previously requested frame
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Start receiving move/end gesture events from the whole interaction surface
    fn listen_global_gestures(&mut self) -> Option<ListenerHandle>;

    /// Stop receiving global gesture events
    fn unlisten_global_gestures(&mut self, handle: ListenerHandle);
}

/// Host with no primitives at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl CarouselHost for NullHost {
    fn has_frame_primitives(&self) -> bool {
        false
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        None
    }

    fn cancel_frame(&mut self, _handle: FrameHandle) {}

    fn listen_global_gestures(&mut self) -> Option<ListenerHandle> {
        None
    }

    fn unlisten_global_gestures(&mut self, _handle: ListenerHandle) {}
}

/// Deterministic host driven by hand.
///
/// Records pending frames and active listeners so a caller can fire frames
/// one at a time and inspect what the engine holds.
#[derive(Debug, Default)]
pub struct ManualHost {
    next_id: u64,
    pending_frames: BTreeSet<FrameHandle>,
    listeners: BTreeSet<ListenerHandle>,
    cancelled_frames: u64,
}

impl ManualHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and not yet fired or cancelled
    pub fn pending_frames(&self) -> impl Iterator<Item = FrameHandle> + '_ {
        self.pending_frames.iter().copied()
    }

    /// Number of pending frames
    pub fn pending_frame_count(&self) -> usize {
        self.pending_frames.len()
    }

    /// Remove and return the oldest pending frame, as a display refresh would
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frames.pop_first()
    }

    /// Number of active global gesture listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of frames cancelled so far
    pub fn cancelled_frames(&self) -> u64 {
        self.cancelled_frames
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl CarouselHost for ManualHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.next_id());
        self.pending_frames.insert(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frames.remove(&handle) {
            self.cancelled_frames += 1;
        }
    }

    fn listen_global_gestures(&mut self) -> Option<ListenerHandle> {
        let handle = ListenerHandle(self.next_id());
        self.listeners.insert(handle);
        Some(handle)
    }

    fn unlisten_global_gestures(&mut self, handle: ListenerHandle) {
        self.listeners.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_host_has_no_primitives() {
        let mut host = NullHost;
        assert!(!host.has_frame_primitives());
        assert!(ManualHost::new().has_frame_primitives());
        assert_eq!(host.request_frame(), None);
        assert_eq!(host.listen_global_gestures(), None);
    }

    #[test]
    fn test_manual_host_frames() {
        let mut host = ManualHost::new();
        let first = host.request_frame().unwrap();
        let second = host.request_frame().unwrap();
        assert_eq!(host.pending_frame_count(), 2);

        host.cancel_frame(second);
        assert_eq!(host.cancelled_frames(), 1);
        assert_eq!(host.take_frame(), Some(first));
        assert_eq!(host.take_frame(), None);

        // Cancelling a fired frame is not counted
        host.cancel_frame(first);
        assert_eq!(host.cancelled_frames(), 1);
    }

    #[test]
    fn test_manual_host_listeners() {
        let mut host = ManualHost::new();
        let handle = host.listen_global_gestures().unwrap();
        assert_eq!(host.listener_count(), 1);
        host.unlisten_global_gestures(handle);
        assert_eq!(host.listener_count(), 0);
    }
}
