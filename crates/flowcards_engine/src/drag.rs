// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drag controller: pointer and touch gestures mutating the offset directly.
//!
//! A gesture moves the strip relative to where it was grabbed. Once the
//! candidate offset leaves `(-total_width - stride, stride]` it is shifted
//! by whole total widths, which lands on identical content because the
//! strip is tripled, and the gesture origin is shifted with it.

use crate::config::Geometry;
use crate::host::{CarouselHost, ListenerHandle};

/// Input device that produced a gesture event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerSource {
    /// Mouse or pen pointer
    #[default]
    Mouse,
    /// Touch screen
    Touch,
}

/// One gesture start or move event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureEvent {
    /// Producing device
    pub source: PointerSource,
    /// Horizontal coordinate, `None` when the event carried none
    pub x: Option<f64>,
}

impl GestureEvent {
    /// Mouse event at `x`
    pub fn mouse(x: f64) -> Self {
        Self {
            source: PointerSource::Mouse,
            x: Some(x),
        }
    }

    /// Touch event; the first touch point is used
    pub fn touch(touches: &[f64]) -> Self {
        Self {
            source: PointerSource::Touch,
            x: touches.first().copied(),
        }
    }

    /// Event that carried no usable coordinate
    pub fn without_coordinates(source: PointerSource) -> Self {
        Self { source, x: None }
    }

    fn coordinate(&self) -> Option<f64> {
        self.x.filter(|x| x.is_finite())
    }
}

/// How a gesture ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEnd {
    /// Mouse button released
    PointerUp,
    /// Last touch lifted
    TouchEnd,
    /// Gesture cancelled by the platform
    Cancel,
}

/// Transient state of one drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Pointer x at gesture start; set by the first move with a coordinate
    /// when the start event carried none
    pub pointer_start_x: Option<f64>,
    /// Offset the gesture is relative to, shifted on every rebase
    pub offset_at_gesture_start: f64,
    /// Device that started the gesture
    pub source: PointerSource,
    listener: Option<ListenerHandle>,
}

impl DragSession {
    /// Global listener registration held by this session
    pub fn listener(&self) -> Option<ListenerHandle> {
        self.listener
    }
}

/// Result of bounding a candidate offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rebased {
    /// Offset to apply
    pub offset: f64,
    /// Amount added to the candidate (a whole multiple of total width)
    pub shift: f64,
}

/// Shift `candidate` by whole total widths into `(-total_width - stride, stride]`.
///
/// Geometry that does not wrap leaves the candidate as is.
pub fn rebase(candidate: f64, geometry: &Geometry) -> Rebased {
    let mut offset = candidate;
    if geometry.wraps() {
        let total = geometry.total_width;
        let stride = geometry.stride;
        // Jump by whole loops first so a huge delta does not iterate
        if offset > stride + total {
            offset -= ((offset - stride) / total).floor() * total;
        } else if offset <= -2.0 * total - stride {
            offset += ((-total - stride - offset) / total).floor() * total;
        }
        while offset > stride {
            offset -= total;
        }
        while offset <= -total - stride {
            offset += total;
        }
    }

    Rebased {
        offset,
        shift: offset - candidate,
    }
}

/// Drag state machine: `Idle -> Dragging -> Idle`
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    /// Create an idle controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start a gesture at the current `offset`.
    ///
    /// Acquires the global gesture listeners from `host`. A second start
    /// while dragging restarts the gesture from the new pointer position
    /// and keeps the existing listener registration.
    pub fn begin(&mut self, event: GestureEvent, offset: f64, host: &mut impl CarouselHost) {
        let listener = match self.session.take() {
            Some(previous) => previous.listener,
            None => host.listen_global_gestures(),
        };

        let pointer_start_x = event.coordinate();
        if pointer_start_x.is_none() {
            tracing::warn!(source = ?event.source, "gesture start without coordinates");
        }

        tracing::debug!(?pointer_start_x, offset, "drag started");
        self.session = Some(DragSession {
            pointer_start_x,
            offset_at_gesture_start: offset,
            source: event.source,
            listener,
        });
    }

    /// Apply a move event and return the new offset.
    ///
    /// Returns `None` when idle. A move without coordinates counts as zero
    /// delta.
    pub fn update(&mut self, event: GestureEvent, geometry: &Geometry, sensitivity: f64) -> Option<f64> {
        let session = self.session.as_mut()?;

        let raw_delta = match (event.coordinate(), session.pointer_start_x) {
            (Some(x), Some(start)) => x - start,
            (Some(x), None) => {
                session.pointer_start_x = Some(x);
                0.0
            }
            (None, _) => {
                tracing::warn!(source = ?event.source, "gesture move without coordinates");
                0.0
            }
        };

        let candidate = session.offset_at_gesture_start + raw_delta * sensitivity;
        let rebased = rebase(candidate, geometry);
        if rebased.shift != 0.0 {
            session.offset_at_gesture_start += rebased.shift;
            tracing::trace!(
                candidate,
                offset = rebased.offset,
                origin = session.offset_at_gesture_start,
                "drag rebased"
            );
        }

        Some(rebased.offset)
    }

    /// End the gesture and release the global listeners.
    ///
    /// This is the only place a session is dropped; it is safe to call while
    /// idle.
    pub fn end(&mut self, host: &mut impl CarouselHost) -> Option<DragSession> {
        let session = self.session.take()?;
        if let Some(listener) = session.listener {
            host.unlisten_global_gestures(listener);
        }
        Some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;
    use crate::host::ManualHost;

    fn five_items() -> Geometry {
        Geometry::new(&CarouselConfig::default(), 5)
    }

    #[test]
    fn test_small_drag_is_not_rebased() {
        let mut host = ManualHost::new();
        let mut drag = DragController::new();
        drag.begin(GestureEvent::mouse(200.0), -100.0, &mut host);

        let offset = drag.update(GestureEvent::mouse(250.0), &five_items(), 1.0);
        assert_eq!(offset, Some(-50.0));
        assert_eq!(drag.session().unwrap().offset_at_gesture_start, -100.0);
    }

    #[test]
    fn test_sensitivity_scales_delta() {
        let mut host = ManualHost::new();
        let mut drag = DragController::new();
        drag.begin(GestureEvent::touch(&[10.0, 400.0]), 0.0, &mut host);

        let offset = drag.update(GestureEvent::touch(&[-40.0]), &five_items(), 2.0);
        assert_eq!(offset, Some(-100.0));
    }

    #[test]
    fn test_rebase_right_edge() {
        let mut host = ManualHost::new();
        let mut drag = DragController::new();
        drag.begin(GestureEvent::mouse(0.0), 300.0, &mut host);

        // candidate 400 > stride 344
        let offset = drag.update(GestureEvent::mouse(100.0), &five_items(), 1.0);
        assert_eq!(offset, Some(400.0 - 1720.0));
        assert_eq!(drag.session().unwrap().offset_at_gesture_start, 300.0 - 1720.0);

        // Continuing the gesture stays continuous
        let offset = drag.update(GestureEvent::mouse(110.0), &five_items(), 1.0);
        assert_eq!(offset, Some(410.0 - 1720.0));
    }

    #[test]
    fn test_rebase_left_edge() {
        let mut host = ManualHost::new();
        let mut drag = DragController::new();
        drag.begin(GestureEvent::mouse(500.0), -2000.0, &mut host);

        // candidate -2100 < -2064
        let offset = drag.update(GestureEvent::mouse(400.0), &five_items(), 1.0);
        assert_eq!(offset, Some(-2100.0 + 1720.0));
        assert_eq!(drag.session().unwrap().offset_at_gesture_start, -2000.0 + 1720.0);
    }

    #[test]
    fn test_long_drag_stays_bounded_and_congruent() {
        let geometry = five_items();
        let mut host = ManualHost::new();
        let mut drag = DragController::new();
        drag.begin(GestureEvent::mouse(0.0), -100.0, &mut host);

        for step in 1..=200 {
            let x = step as f64 * 97.0;
            let offset = drag.update(GestureEvent::mouse(x), &geometry, 1.0).unwrap();
            assert!(offset > -geometry.total_width - geometry.stride);
            assert!(offset <= geometry.stride);

            let expected = -100.0 + x;
            let cycles = (offset - expected) / geometry.total_width;
            assert!((cycles - cycles.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_large_jump_is_bounded() {
        let geometry = five_items();
        let rebased = rebase(10_000.0, &geometry);
        assert!(rebased.offset <= geometry.stride);
        assert!(rebased.offset > -geometry.total_width - geometry.stride);
        assert_eq!(rebased.offset - rebased.shift, 10_000.0);
    }

    #[test]
    fn test_lower_bound_is_exclusive() {
        let geometry = five_items();
        let rebased = rebase(-geometry.total_width - geometry.stride, &geometry);
        assert_eq!(rebased.offset, -geometry.stride);
    }

    #[test]
    fn test_empty_geometry_never_rebases() {
        let empty = Geometry::new(&CarouselConfig::default(), 0);
        let rebased = rebase(5000.0, &empty);
        assert_eq!(rebased.offset, 5000.0);
        assert_eq!(rebased.shift, 0.0);
    }

    #[test]
    fn test_missing_coordinates_are_zero_delta() {
        let mut host = ManualHost::new();
        let mut drag = DragController::new();
        drag.begin(GestureEvent::mouse(100.0), -20.0, &mut host);

        let offset = drag.update(
            GestureEvent::without_coordinates(PointerSource::Touch),
            &five_items(),
            1.0,
        );
        assert_eq!(offset, Some(-20.0));
        assert!(drag.is_dragging());

        let offset = drag.update(GestureEvent::mouse(f64::NAN), &five_items(), 1.0);
        assert_eq!(offset, Some(-20.0));
    }

    #[test]
    fn test_start_without_coordinates_uses_first_move() {
        let mut host = ManualHost::new();
        let mut drag = DragController::new();
        drag.begin(GestureEvent::touch(&[]), -20.0, &mut host);

        assert_eq!(drag.update(GestureEvent::touch(&[300.0]), &five_items(), 1.0), Some(-20.0));
        assert_eq!(drag.update(GestureEvent::touch(&[310.0]), &five_items(), 1.0), Some(-10.0));
    }

    #[test]
    fn test_listeners_are_scoped_to_the_gesture() {
        let mut host = ManualHost::new();
        let mut drag = DragController::new();
        assert!(drag.update(GestureEvent::mouse(1.0), &five_items(), 1.0).is_none());

        drag.begin(GestureEvent::mouse(0.0), 0.0, &mut host);
        assert_eq!(host.listener_count(), 1);

        // Restarting keeps one registration
        drag.begin(GestureEvent::mouse(5.0), -3.0, &mut host);
        assert_eq!(host.listener_count(), 1);

        let session = drag.end(&mut host).unwrap();
        assert_eq!(session.offset_at_gesture_start, -3.0);
        assert_eq!(host.listener_count(), 0);
        assert!(drag.end(&mut host).is_none());
    }
}
