// SPDX-License-Identifier: MIT OR Apache-2.0
//! Carousel composition: lifecycle, autoplay ticks and render output.
//!
//! The engine state is split in two regions:
//! - the session region (drag, hover, visibility, frame task) is updated on
//!   every pointer move and frame without asking for a redraw
//! - the observable region (the scroll offset) carries a revision and is the
//!   only thing whose change requires the strip to be redrawn

use crate::config::{CarouselConfig, Geometry};
use crate::drag::{DragController, GestureEnd, GestureEvent};
use crate::frame::FrameTask;
use crate::host::{CarouselHost, FrameHandle};
use crate::hover::HoverState;
use crate::scroll::ScrollState;
use crate::sequence::{build_sequence, ItemSequence, SlotKey};
use crate::visibility::{Region, VisibilityGate};

/// Number of skeleton slots shown before the widget is mounted
pub const PLACEHOLDER_SLOTS: usize = 3;

/// Widget lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Created, not yet mounted; renders a placeholder
    #[default]
    Pending,
    /// Mounted and live
    Mounted,
    /// Torn down; every subscription has been released
    Unmounted,
}

/// High-frequency bookkeeping that never triggers a redraw by itself
#[derive(Debug, Default)]
pub struct SessionState {
    /// Drag state machine
    pub drag: DragController,
    /// Hovered item
    pub hover: HoverState,
    /// On-screen flag
    pub visibility: VisibilityGate,
    /// Autoplay frame task
    pub frame: FrameTask,
}

/// Render-driving state
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservableState {
    /// Horizontal offset of the strip
    pub scroll: ScrollState,
}

/// All mutable state of one widget instance
#[derive(Debug, Default)]
pub struct EngineState {
    /// Session region
    pub session: SessionState,
    /// Observable region
    pub observable: ObservableState,
}

/// Cursor the presentation layer should show over the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// Idle, ready to be grabbed
    Grab,
    /// A drag is in progress
    Grabbing,
}

/// Visual state of one rendered slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotState {
    /// Position in the tripled sequence
    pub position: usize,
    /// Stable key (original index and copy)
    pub key: SlotKey,
    /// This slot's item is the hovered one
    pub hovered: bool,
    /// Another item is hovered
    pub dulled: bool,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub enum RenderFrame {
    /// Not mounted yet: static skeleton slots, no offset
    Placeholder {
        /// Number of skeleton slots
        slots: usize,
        /// Width of each skeleton slot
        item_width: f64,
    },
    /// Live strip
    Strip {
        /// Translation applied to the strip container
        offset: f64,
        /// Per-slot visual flags in render order
        slots: Vec<SlotState>,
    },
}

/// An infinite horizontal flowing-card carousel
pub struct Carousel<T, H: CarouselHost> {
    config: CarouselConfig,
    sequence: ItemSequence<T>,
    geometry: Geometry,
    state: EngineState,
    lifecycle: Lifecycle,
    host: H,
}

impl<T: Clone, H: CarouselHost> Carousel<T, H> {
    /// Create a carousel over `items`.
    ///
    /// Invalid configuration values are replaced by their defaults.
    pub fn new(items: &[T], config: CarouselConfig, host: H) -> Self {
        let config = config.sanitized();
        let (sequence, geometry) = build_sequence(items, &config);
        let state = EngineState {
            session: SessionState {
                visibility: VisibilityGate::new(config.visibility_margin),
                ..SessionState::default()
            },
            observable: ObservableState::default(),
        };

        Self {
            config,
            sequence,
            geometry,
            state,
            lifecycle: Lifecycle::Pending,
            host,
        }
    }

    /// Replace the item list.
    ///
    /// Rebuilds the sequence and geometry; the offset and an active drag
    /// session carry over untouched.
    pub fn set_items(&mut self, items: &[T]) {
        let (sequence, geometry) = build_sequence(items, &self.config);
        self.sequence = sequence;
        self.geometry = geometry;

        if let Some(index) = self.state.session.hover.index() {
            if index >= geometry.count {
                self.state.session.hover.clear();
            }
        }

        tracing::debug!(count = geometry.count, total_width = geometry.total_width, "items replaced");
        self.sync_frame_task();
    }
}

impl<T, H: CarouselHost> Carousel<T, H> {
    /// Mount the widget; the autoplay task is armed once it is visible
    pub fn mount(&mut self) {
        if self.lifecycle != Lifecycle::Pending {
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        tracing::debug!(count = self.geometry.count, "carousel mounted");
        self.sync_frame_task();
    }

    /// Tear the widget down.
    ///
    /// Cancels the pending frame, removes the global gesture listeners and
    /// discards any drag session. Safe to call more than once; also runs on
    /// drop.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounted;

        let session = &mut self.state.session;
        session.frame.cancel(&mut self.host);
        if session.drag.end(&mut self.host).is_some() {
            tracing::debug!("drag session discarded on unmount");
        }
        session.hover.clear();
        session.visibility.set(false);

        tracing::debug!("carousel unmounted");
    }

    /// Current lifecycle phase
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// Feed a visibility signal computed by the host
    pub fn set_visible(&mut self, visible: bool) {
        if !self.is_mounted() {
            return;
        }
        if let Some(visible) = self.state.session.visibility.set(visible) {
            tracing::debug!(visible, "visibility changed");
            self.sync_frame_task();
        }
    }

    /// Feed the widget region and the viewport; visibility follows their intersection
    pub fn observe_visibility(&mut self, widget: Region, viewport: Region) {
        if !self.is_mounted() {
            return;
        }
        if let Some(visible) = self.state.session.visibility.observe(widget, viewport) {
            tracing::debug!(visible, "visibility changed");
            self.sync_frame_task();
        }
    }

    /// Hover enter or leave for an original item index.
    ///
    /// Ignored while dragging.
    pub fn set_hover(&mut self, index: usize, entering: bool) {
        if !self.is_mounted() || self.state.session.drag.is_dragging() {
            return;
        }
        if index >= self.geometry.count {
            return;
        }
        if self.state.session.hover.apply(index, entering) {
            tracing::trace!(hovered = ?self.state.session.hover.index(), "hover changed");
        }
    }

    /// Start a drag gesture
    pub fn gesture_start(&mut self, event: GestureEvent) {
        if !self.is_mounted() || self.geometry.count == 0 {
            return;
        }
        let offset = self.state.observable.scroll.offset();
        self.state.session.drag.begin(event, offset, &mut self.host);
    }

    /// Move an active drag gesture; ignored while idle
    pub fn gesture_move(&mut self, event: GestureEvent) {
        let moved = self.state.session.drag.update(
            event,
            &self.geometry,
            self.config.drag_sensitivity,
        );
        if let Some(offset) = moved {
            self.state.observable.scroll.set(offset);
        }
    }

    /// End the active drag gesture; autoplay resumes on the next eligible frame
    pub fn gesture_end(&mut self, end: GestureEnd) {
        if self.state.session.drag.end(&mut self.host).is_some() {
            tracing::debug!(?end, offset = self.offset(), "drag ended");
        }
    }

    /// Handle a frame fired by the host.
    ///
    /// Frames that are not the task's pending request are ignored. Returns
    /// whether the offset advanced.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if !self.state.session.frame.accept(handle) {
            tracing::trace!(frame = handle.0, "stale frame ignored");
            return false;
        }

        let advanced = self.tick();
        self.sync_frame_task();
        advanced
    }

    /// One autoplay step, if nothing suppresses it.
    ///
    /// Runs when autoplay is enabled, no drag is active, nothing is hovered
    /// and the widget is visible.
    pub fn tick(&mut self) -> bool {
        if !self.autoplay_eligible() {
            return false;
        }
        let advanced = self
            .state
            .observable
            .scroll
            .advance(self.config.speed, &self.geometry);
        if advanced {
            tracing::trace!(offset = self.offset(), "autoplay tick");
        }
        advanced
    }

    fn autoplay_eligible(&self) -> bool {
        let session = &self.state.session;
        self.is_mounted()
            && self.config.auto_play
            && !session.drag.is_dragging()
            && !session.hover.is_active()
            && session.visibility.is_visible()
    }

    fn sync_frame_task(&mut self) {
        let wanted = self.is_mounted()
            && self.config.auto_play
            && self.geometry.wraps()
            && self.state.session.visibility.is_visible();

        let frame = &mut self.state.session.frame;
        if wanted {
            frame.start(&mut self.host);
        } else {
            frame.cancel(&mut self.host);
        }
    }

    /// Current offset
    pub fn offset(&self) -> f64 {
        self.state.observable.scroll.offset()
    }

    /// Revision of the observable region; changes whenever a redraw is due
    pub fn revision(&self) -> u64 {
        self.state.observable.scroll.revision()
    }

    /// Whether a drag gesture is active
    pub fn is_dragging(&self) -> bool {
        self.state.session.drag.is_dragging()
    }

    /// Hovered original index
    pub fn hovered(&self) -> Option<usize> {
        self.state.session.hover.index()
    }

    /// Visibility flag
    pub fn is_visible(&self) -> bool {
        self.state.session.visibility.is_visible()
    }

    /// Whether the autoplay frame task has a pending frame
    pub fn is_animating(&self) -> bool {
        self.state.session.frame.is_armed()
    }

    /// Cursor for the strip
    pub fn cursor(&self) -> CursorHint {
        if self.is_dragging() {
            CursorHint::Grabbing
        } else {
            CursorHint::Grab
        }
    }

    /// Effective (sanitized) configuration
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Derived geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The tripled render sequence
    pub fn sequence(&self) -> &ItemSequence<T> {
        &self.sequence
    }

    /// Full engine state
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Visual state of every rendered slot together with its item
    pub fn slots(&self) -> impl Iterator<Item = (SlotState, &T)> {
        let hover = self.state.session.hover;
        self.sequence
            .iter()
            .enumerate()
            .map(move |(position, (key, item))| {
                let state = SlotState {
                    position,
                    key,
                    hovered: hover.is_hovered(key.original),
                    dulled: hover.is_dulled(key.original),
                };
                (state, item)
            })
    }

    /// Output for the presentation layer.
    ///
    /// Reports the placeholder until mounted, after unmount, and for the
    /// whole life of a host without display frames.
    pub fn render(&self) -> RenderFrame {
        if self.is_mounted() && self.host.has_frame_primitives() {
            return RenderFrame::Strip {
                offset: self.offset(),
                slots: self.slots().map(|(state, _)| state).collect(),
            };
        }

        RenderFrame::Placeholder {
            slots: self.geometry.count.min(PLACEHOLDER_SLOTS),
            item_width: self.config.item_width,
        }
    }
}

impl<T, H: CarouselHost> Drop for Carousel<T, H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<T, H: CarouselHost> std::fmt::Debug for Carousel<T, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("state", &self.state)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
