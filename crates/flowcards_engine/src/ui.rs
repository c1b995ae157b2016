// SPDX-License-Identifier: MIT OR Apache-2.0
//! Carousel UI rendering.
//!
//! Features:
//! - Frame scheduling through egui repaint requests
//! - Pointer and touch dragging, tracked window-wide once started
//! - Hover pause with dulled neighbours
//! - Visibility from the enclosing clip rect
//! - Edge fades and a control hint badge

use crate::config::CarouselConfig;
use crate::drag::{GestureEnd, GestureEvent, PointerSource};
use crate::engine::{Carousel, CursorHint, Lifecycle, SlotState, PLACEHOLDER_SLOTS};
use crate::host::{CarouselHost, FrameHandle, ListenerHandle};
use crate::visibility::Region;
use egui::{Color32, CursorIcon, Pos2, Rect, Sense, Shape, Stroke, Vec2};

const DEFAULT_ITEM_HEIGHT: f32 = 500.0;
const VERTICAL_PADDING: f32 = 32.0;
const EDGE_FADE_WIDTH: f32 = 64.0;
const DULLED_OPACITY: f32 = 0.3;
const DULLED_SCALE: f32 = 0.95;
const HOVERED_SCALE: f32 = 1.05;
const PLACEHOLDER_OPACITY: f32 = 0.5;
const HINT_TEXT: &str = "\u{2195} Drag \u{2022} Hover to pause";

type ItemPainter<'a, T> = dyn FnMut(&mut egui::Ui, &T, SlotState) + 'a;

/// Host backed by an egui context.
///
/// A frame request is a repaint request; the frame fires at the start of
/// the next pass. Gesture listening is window-wide because egui reports the
/// pointer position everywhere in the window.
pub struct EguiHost {
    ctx: egui::Context,
    next_id: u64,
    pending_frame: Option<FrameHandle>,
    listener: Option<ListenerHandle>,
}

impl EguiHost {
    /// Create a host for `ctx`
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            next_id: 0,
            pending_frame: None,
            listener: None,
        }
    }

    /// Take the frame requested during an earlier pass
    pub fn take_due_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    /// Whether global gesture events should be delivered
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl CarouselHost for EguiHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.next_id());
        self.pending_frame = Some(handle);
        self.ctx.request_repaint();
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
    }

    fn listen_global_gestures(&mut self) -> Option<ListenerHandle> {
        let handle = ListenerHandle(self.next_id());
        self.listener = Some(handle);
        Some(handle)
    }

    fn unlisten_global_gestures(&mut self, handle: ListenerHandle) {
        if self.listener == Some(handle) {
            self.listener = None;
        }
    }
}

/// Pointer input sampled once per pass
#[derive(Debug, Clone, Copy)]
struct PointerSample {
    source: PointerSource,
    pressed_at: Option<Pos2>,
    released: bool,
    any_down: bool,
    latest: Option<Pos2>,
    hover: Option<Pos2>,
}

impl PointerSample {
    fn read(ui: &egui::Ui) -> Self {
        ui.input(|input| {
            let pointer = &input.pointer;
            Self {
                source: if input.any_touches() {
                    PointerSource::Touch
                } else {
                    PointerSource::Mouse
                },
                pressed_at: pointer
                    .primary_pressed()
                    .then(|| pointer.press_origin())
                    .flatten(),
                released: pointer.primary_released(),
                any_down: pointer.any_down(),
                latest: pointer.latest_pos(),
                hover: pointer.hover_pos(),
            }
        })
    }

    fn event(&self, pos: Option<Pos2>) -> GestureEvent {
        match pos {
            Some(pos) => GestureEvent {
                source: self.source,
                x: Some(f64::from(pos.x)),
            },
            None => GestureEvent::without_coordinates(self.source),
        }
    }

    fn end_kind(&self) -> GestureEnd {
        match self.source {
            PointerSource::Mouse => GestureEnd::PointerUp,
            PointerSource::Touch => GestureEnd::TouchEnd,
        }
    }
}

/// Carousel widget for embedding in an egui layout
pub struct CarouselWidget<T> {
    carousel: Carousel<T, EguiHost>,
    /// Height of each item
    pub item_height: f32,
    /// Show the control hint badge
    pub show_hint: bool,
    /// Fade the strip out at both edges
    pub show_edge_fades: bool,
}

impl<T: Clone> CarouselWidget<T> {
    /// Create a widget over `items`
    pub fn new(ctx: &egui::Context, items: &[T], config: CarouselConfig) -> Self {
        Self {
            carousel: Carousel::new(items, config, EguiHost::new(ctx.clone())),
            item_height: DEFAULT_ITEM_HEIGHT,
            show_hint: true,
            show_edge_fades: true,
        }
    }

    /// Set the item height
    pub fn with_item_height(mut self, item_height: f32) -> Self {
        self.item_height = item_height;
        self
    }

    /// Replace the item list
    pub fn set_items(&mut self, items: &[T]) {
        self.carousel.set_items(items);
    }
}

impl<T> CarouselWidget<T> {
    /// The underlying engine
    pub fn carousel(&self) -> &Carousel<T, EguiHost> {
        &self.carousel
    }

    /// The underlying engine, mutably
    pub fn carousel_mut(&mut self) -> &mut Carousel<T, EguiHost> {
        &mut self.carousel
    }

    /// Render the strip.
    ///
    /// `add_item` draws one item into a child UI sized to its slot; it is
    /// only called for slots that intersect the widget.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        mut add_item: impl FnMut(&mut egui::Ui, &T, SlotState),
    ) -> egui::Response {
        let size = Vec2::new(
            ui.available_width(),
            self.item_height + 2.0 * VERTICAL_PADDING,
        );
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

        if self.carousel.lifecycle() == Lifecycle::Pending {
            self.paint_placeholder(ui, rect);
            self.carousel.mount();
            ui.ctx().request_repaint();
            return response;
        }

        let due = self.carousel.host_mut().take_due_frame();
        let sample = PointerSample::read(ui);

        self.handle_gestures(rect, &sample);
        self.sync_hover(rect, &sample);
        self.carousel
            .observe_visibility(region(rect), region(ui.clip_rect()));

        if let Some(frame) = due {
            self.carousel.on_frame(frame);
        }

        self.paint_strip(ui, rect, &mut add_item);
        if self.show_edge_fades {
            paint_edge_fades(ui, rect);
        }
        if self.show_hint {
            paint_hint(ui, rect);
        }

        if self.carousel.is_dragging() || response.hovered() {
            ui.ctx().set_cursor_icon(match self.carousel.cursor() {
                CursorHint::Grab => CursorIcon::Grab,
                CursorHint::Grabbing => CursorIcon::Grabbing,
            });
        }

        response
    }

    fn handle_gestures(&mut self, rect: Rect, sample: &PointerSample) {
        if !self.carousel.is_dragging() {
            if let Some(origin) = sample.pressed_at.filter(|pos| rect.contains(*pos)) {
                self.carousel.gesture_start(sample.event(Some(origin)));
            }
            return;
        }

        if !self.carousel.host().is_listening() {
            return;
        }

        if sample.released {
            self.carousel.gesture_move(sample.event(sample.latest));
            self.carousel.gesture_end(sample.end_kind());
        } else if !sample.any_down {
            // Release happened where we could not see it
            self.carousel.gesture_end(GestureEnd::Cancel);
        } else {
            self.carousel.gesture_move(sample.event(sample.latest));
        }
    }

    /// Emit hover enter/leave for the slot under the pointer.
    ///
    /// Compares against the engine's tracked index so a hover that changed
    /// while a drag swallowed the events is caught up afterwards.
    fn sync_hover(&mut self, rect: Rect, sample: &PointerSample) {
        if self.carousel.is_dragging() {
            return;
        }

        let under_pointer = sample
            .hover
            .filter(|pos| rect.contains(*pos))
            .and_then(|pos| self.slot_at(rect, pos));
        let tracked = self.carousel.hovered();
        if under_pointer == tracked {
            return;
        }

        if let Some(previous) = tracked {
            self.carousel.set_hover(previous, false);
        }
        if let Some(current) = under_pointer {
            self.carousel.set_hover(current, true);
        }
    }

    /// Original index of the slot under `pos`, ignoring the gaps
    fn slot_at(&self, rect: Rect, pos: Pos2) -> Option<usize> {
        let geometry = self.carousel.geometry();
        if geometry.count == 0 || geometry.stride <= 0.0 {
            return None;
        }

        let local = f64::from(pos.x - rect.left()) - self.carousel.offset();
        if local < 0.0 {
            return None;
        }
        let position = (local / geometry.stride).floor() as usize;
        let within = local - position as f64 * geometry.stride;
        if within > self.carousel.config().item_width {
            return None;
        }
        self.carousel.sequence().original_index(position)
    }

    fn slot_rect(&self, rect: Rect, position: usize) -> Rect {
        let stride = self.carousel.geometry().stride;
        let x = f64::from(rect.left()) + self.carousel.offset() + position as f64 * stride;
        Rect::from_min_size(
            Pos2::new(x as f32, rect.top() + VERTICAL_PADDING),
            Vec2::new(self.carousel.config().item_width as f32, self.item_height),
        )
    }

    fn paint_strip(&self, ui: &mut egui::Ui, rect: Rect, add_item: &mut ItemPainter<'_, T>) {
        let clip = rect.intersect(ui.clip_rect());
        let mut hovered_slots = Vec::new();

        for (slot, item) in self.carousel.slots() {
            let slot_rect = self.slot_rect(rect, slot.position);
            if !slot_rect.intersects(clip) {
                continue;
            }
            if slot.hovered {
                // Drawn last so the enlarged slot sits on top of its neighbours
                hovered_slots.push((slot, item, slot_rect));
                continue;
            }
            show_slot(ui, clip, slot_rect, slot, item, add_item);
        }

        for (slot, item, slot_rect) in hovered_slots {
            show_slot(ui, clip, slot_rect, slot, item, add_item);
        }
    }

    fn paint_placeholder(&self, ui: &egui::Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        let fill = ui
            .visuals()
            .faint_bg_color
            .gamma_multiply(PLACEHOLDER_OPACITY);
        let slots = self.carousel.geometry().count.min(PLACEHOLDER_SLOTS);

        for position in 0..slots {
            painter.rect_filled(self.slot_rect(rect, position), 12.0, fill);
        }
    }
}

// Edges are copied as is; the clip rect can be unbounded
fn region(rect: Rect) -> Region {
    Region {
        min_x: f64::from(rect.min.x),
        min_y: f64::from(rect.min.y),
        max_x: f64::from(rect.max.x),
        max_y: f64::from(rect.max.y),
    }
}

fn show_slot<T>(
    ui: &mut egui::Ui,
    clip: Rect,
    slot_rect: Rect,
    slot: SlotState,
    item: &T,
    add_item: &mut ItemPainter<'_, T>,
) {
    let scale = if slot.dulled {
        DULLED_SCALE
    } else if slot.hovered {
        HOVERED_SCALE
    } else {
        1.0
    };
    let slot_rect = slot_rect.scale_from_center(scale);

    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(slot_rect)
            .id_salt(("flowcards_slot", slot.key.original, slot.key.copy)),
    );
    child.set_clip_rect(clip);
    if slot.dulled {
        child.set_opacity(DULLED_OPACITY);
    }
    add_item(&mut child, item, slot);
}

fn paint_edge_fades(ui: &egui::Ui, rect: Rect) {
    let painter = ui.painter_at(rect);
    let solid = ui.visuals().panel_fill;
    let width = EDGE_FADE_WIDTH.min(rect.width() / 2.0);

    let left = Rect::from_min_size(rect.min, Vec2::new(width, rect.height()));
    let right = Rect::from_min_size(
        Pos2::new(rect.right() - width, rect.top()),
        Vec2::new(width, rect.height()),
    );
    painter.add(horizontal_gradient(left, solid, Color32::TRANSPARENT));
    painter.add(horizontal_gradient(right, Color32::TRANSPARENT, solid));
}

fn horizontal_gradient(rect: Rect, from: Color32, to: Color32) -> Shape {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), from);
    mesh.colored_vertex(rect.right_top(), to);
    mesh.colored_vertex(rect.right_bottom(), to);
    mesh.colored_vertex(rect.left_bottom(), from);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    Shape::mesh(mesh)
}

fn paint_hint(ui: &egui::Ui, rect: Rect) {
    let painter = ui.painter_at(rect);
    let visuals = ui.visuals();
    let font = egui::FontId::proportional(11.0);
    let galley = painter.layout_no_wrap(HINT_TEXT.to_string(), font, visuals.weak_text_color());

    let padding = Vec2::new(12.0, 6.0);
    let size = galley.size() + 2.0 * padding;
    let badge = Rect::from_min_size(
        Pos2::new(rect.right() - 16.0 - size.x, rect.top() + 8.0),
        size,
    );

    painter.rect(
        badge,
        size.y / 2.0,
        visuals.extreme_bg_color.gamma_multiply(0.9),
        Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color),
    );
    painter.galley(badge.min + padding, galley, visuals.weak_text_color());
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    const ISSUES: [&str; 5] = ["ai-beauty", "couture", "machines", "dreams", "quantum"];

    fn widget() -> CarouselWidget<&'static str> {
        let ctx = egui::Context::default();
        let mut widget = CarouselWidget::new(&ctx, &ISSUES, CarouselConfig::default());
        widget.carousel_mut().mount();
        widget
    }

    fn strip() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 564.0))
    }

    fn hovering(pos: Pos2) -> PointerSample {
        PointerSample {
            source: PointerSource::Mouse,
            pressed_at: None,
            released: false,
            any_down: false,
            latest: Some(pos),
            hover: Some(pos),
        }
    }

    fn pressed(pos: Pos2) -> PointerSample {
        PointerSample {
            pressed_at: Some(pos),
            any_down: true,
            ..hovering(pos)
        }
    }

    fn held(pos: Pos2) -> PointerSample {
        PointerSample {
            any_down: true,
            ..hovering(pos)
        }
    }

    fn released(pos: Pos2) -> PointerSample {
        PointerSample {
            released: true,
            ..hovering(pos)
        }
    }

    /// Drag the strip by `dx` with a full press, move and release
    fn drag_by(widget: &mut CarouselWidget<&'static str>, dx: f32) {
        let start = pos2(500.0, 100.0);
        let end = pos2(500.0 + dx, 100.0);
        widget.handle_gestures(strip(), &pressed(start));
        widget.handle_gestures(strip(), &held(end));
        widget.handle_gestures(strip(), &released(end));
    }

    #[test]
    fn test_slot_at_skips_gaps() {
        let widget = widget();
        assert_eq!(widget.slot_at(strip(), pos2(10.0, 100.0)), Some(0));
        assert_eq!(widget.slot_at(strip(), pos2(330.0, 100.0)), None);
        assert_eq!(widget.slot_at(strip(), pos2(350.0, 100.0)), Some(1));
    }

    #[test]
    fn test_slot_at_follows_offset() {
        let mut widget = widget();
        drag_by(&mut widget, 100.0);
        assert_eq!(widget.carousel().offset(), 100.0);
        // Left of the first slot
        assert_eq!(widget.slot_at(strip(), pos2(50.0, 100.0)), None);
        assert_eq!(widget.slot_at(strip(), pos2(110.0, 100.0)), Some(0));

        drag_by(&mut widget, -500.0);
        assert_eq!(widget.carousel().offset(), -400.0);
        assert_eq!(widget.slot_at(strip(), pos2(10.0, 100.0)), Some(1));
    }

    #[test]
    fn test_sync_hover_tracks_pointer() {
        let mut widget = widget();
        widget.sync_hover(strip(), &hovering(pos2(10.0, 100.0)));
        assert_eq!(widget.carousel().hovered(), Some(0));

        widget.sync_hover(strip(), &hovering(pos2(350.0, 100.0)));
        assert_eq!(widget.carousel().hovered(), Some(1));

        widget.sync_hover(strip(), &hovering(pos2(330.0, 100.0)));
        assert_eq!(widget.carousel().hovered(), None);

        widget.sync_hover(strip(), &hovering(pos2(10.0, 100.0)));
        widget.sync_hover(strip(), &hovering(pos2(10.0, 700.0)));
        assert_eq!(widget.carousel().hovered(), None);
    }

    #[test]
    fn test_hover_catches_up_after_drag() {
        let mut widget = widget();
        let grab = pos2(10.0, 100.0);
        widget.sync_hover(strip(), &hovering(grab));
        assert_eq!(widget.carousel().hovered(), Some(0));

        widget.handle_gestures(strip(), &pressed(grab));
        assert!(widget.carousel().is_dragging());
        let end = pos2(10.0 - 344.0, 100.0);
        widget.handle_gestures(strip(), &held(end));
        widget.handle_gestures(strip(), &released(end));
        assert!(!widget.carousel().is_dragging());
        assert_eq!(widget.carousel().offset(), -344.0);

        // The card under the resting pointer moved while the drag held the hover
        widget.sync_hover(strip(), &hovering(grab));
        assert_eq!(widget.carousel().hovered(), Some(1));
    }

    #[test]
    fn test_release_ends_drag_at_last_position() {
        let mut widget = widget();
        widget.handle_gestures(strip(), &pressed(pos2(500.0, 100.0)));
        assert!(widget.carousel().host().is_listening());

        widget.handle_gestures(strip(), &released(pos2(450.0, 300.0)));
        assert!(!widget.carousel().is_dragging());
        assert!(!widget.carousel().host().is_listening());
        assert_eq!(widget.carousel().offset(), -50.0);
    }

    #[test]
    fn test_unseen_release_cancels_drag() {
        let mut widget = widget();
        widget.handle_gestures(strip(), &pressed(pos2(500.0, 100.0)));
        widget.handle_gestures(strip(), &held(pos2(520.0, 100.0)));

        let gone = PointerSample {
            any_down: false,
            ..hovering(pos2(900.0, 900.0))
        };
        widget.handle_gestures(strip(), &gone);
        assert!(!widget.carousel().is_dragging());
        assert!(!widget.carousel().host().is_listening());
        assert_eq!(widget.carousel().offset(), 20.0);
    }

    #[test]
    fn test_press_outside_strip_is_ignored() {
        let mut widget = widget();
        widget.handle_gestures(strip(), &pressed(pos2(500.0, 800.0)));
        assert!(!widget.carousel().is_dragging());
    }
}
