// SPDX-License-Identifier: MIT OR Apache-2.0
//! Infinite horizontal flowing-card carousel.
//!
//! This crate provides a self-contained carousel engine:
//! - Continuous autoplay scrolling, paced one step per display frame
//! - Pointer and touch dragging that overrides and then resumes autoplay
//! - Seamless infinite wraparound over a tripled item strip
//! - Hover pause with de-emphasized neighbours
//! - Suspension while off-screen
//!
//! ## Architecture
//!
//! The engine is built on:
//! - An opaque item sequence (items are never inspected)
//! - A single observable offset plus per-slot visual flags as output
//! - A host seam supplying frame scheduling and global gesture listeners
//! - An egui adapter that renders the strip and feeds input back in

pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod frame;
pub mod host;
pub mod hover;
pub mod scroll;
pub mod sequence;
pub mod ui;
pub mod visibility;

pub use config::{CarouselConfig, Geometry};
pub use drag::{DragController, DragSession, GestureEnd, GestureEvent, PointerSource};
pub use engine::{Carousel, CursorHint, EngineState, Lifecycle, RenderFrame, SlotState};
pub use error::ConfigError;
pub use frame::FrameTask;
pub use host::{CarouselHost, FrameHandle, ListenerHandle, ManualHost, NullHost};
pub use hover::HoverState;
pub use scroll::ScrollState;
pub use sequence::{build_sequence, ItemSequence, SlotKey};
pub use ui::{CarouselWidget, EguiHost};
pub use visibility::{Region, VisibilityGate};
