// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strewn World: the engine behind an endless, pannable plane of scattered
//! images.
//!
//! [`Engine`] is the single owner of everything mutable:
//! - the [`World`]: items, the identifier registry that keeps each identifier
//!   placed at most once, the occupancy grid that bounds local density, and
//!   the growing placement bounds,
//! - the camera, the gesture classifier, the active hold cluster, and the
//!   set of expanded items,
//! - the periodic [`BatchLoader`] and the [`LazyLoader`] that tells the
//!   renderer when an item comes near the viewport.
//!
//! Hosts feed it pointer, wheel, and frame input with their own clock, and
//! receive drawing updates through a [`Renderer`]. Identifiers come from a
//! [`ContentSource`]; [`source`] has the listing format and a shuffled
//! in-memory catalog, and [`actions`] builds the per-item download and
//! reverse-search links.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use strewn_world::{Engine, EngineConfig, NullRenderer, PointerId, SourceError};
//!
//! let mut engine = Engine::new(EngineConfig::default(), NullRenderer);
//! engine.start(0);
//!
//! // The first frame asks for a load.
//! let report = engine.frame(0).unwrap();
//! assert!(report.load_due);
//!
//! let mut source = |_limit: usize| -> Result<Vec<String>, SourceError> {
//!     Ok(vec!["/img/a.png".into(), "/img/b.png".into(), "/img/a.png".into()])
//! };
//! let batch = engine.load_from(&mut source).unwrap().unwrap();
//! assert_eq!(batch.placed, 2);
//! assert_eq!(batch.duplicates, 1);
//!
//! // A quick press on empty space is a pan.
//! let far = Point::new(-5_000.0, -5_000.0);
//! engine.pointer_down(PointerId(1), far, 16);
//! engine.pointer_up(PointerId(1), far, 40);
//! assert!(engine.gesture_state().is_idle());
//! ```
//!
//! Everything is single-threaded and driven by the host; nothing here spawns
//! threads or reads the wall clock.

pub mod actions;
mod engine;
mod item;
mod loader;
mod placement;
mod render;
pub mod source;
mod world;

pub use engine::{Engine, EngineConfig, FrameReport};
pub use item::{Item, ItemFlags, ItemId};
pub use loader::{BatchLoader, BatchReport, BatchTicket, LoaderConfig};
pub use placement::{Placement, PlacementConfig, Placer};
pub use render::{LazyLoader, NullRenderer, Renderer};
pub use source::{ContentSource, SourceError};
pub use world::World;

pub use strewn_camera::{Camera, CameraDebugInfo, PanConfig};
pub use strewn_gesture::{GestureConfig, GestureEvent, GestureOutcome, GestureState, PointerId};
pub use strewn_layout::{Cluster, ClusterConfig, ExpandConfig, ExpandedSet, Toggle, TrayEntry};
