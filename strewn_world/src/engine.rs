// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use strewn_camera::{Camera, PanConfig};
use strewn_gesture::{
    GestureClassifier, GestureConfig, GestureEvent, GestureOutcome, GestureState, PointerId,
};
use strewn_layout::{
    Cluster, ClusterConfig, ExpandConfig, ExpandedSet, Toggle, TrayEntry, radial_spread,
};
use strewn_timing::{Frame, FrameLoop};
use tracing::{debug, info, trace, warn};

use crate::item::{Item, ItemFlags, ItemId};
use crate::loader::{BatchLoader, BatchReport, BatchTicket, LoaderConfig};
use crate::placement::{Placement, PlacementConfig, Placer};
use crate::render::{LazyLoader, Renderer};
use crate::source::{ContentSource, SourceError};
use crate::world::World;

/// Every tunable of an [`Engine`], with the documented defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Camera inertia and smoothing.
    pub pan: PanConfig,
    /// Long-press duration and movement threshold.
    pub gesture: GestureConfig,
    /// Scatter placement.
    pub placement: PlacementConfig,
    /// Batch cadence and limits.
    pub loader: LoaderConfig,
    /// Hold clusters.
    pub cluster: ClusterConfig,
    /// Radial spread on expansion.
    pub expand: ExpandConfig,
    /// Initial placement box, centered on the origin.
    pub world_size: Size,
    /// Size of the host's viewport in pixels.
    pub viewport: Size,
    /// Edge of the square each item occupies.
    pub item_extent: f64,
    /// Distance around the viewport at which items start loading.
    pub lazy_margin: f64,
    /// Seed of the placement random stream.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pan: PanConfig::default(),
            gesture: GestureConfig::default(),
            placement: PlacementConfig::default(),
            loader: LoaderConfig::default(),
            cluster: ClusterConfig::default(),
            expand: ExpandConfig::default(),
            world_size: Size::new(1600.0, 1000.0),
            viewport: Size::new(1280.0, 800.0),
            item_extent: 240.0,
            lazy_margin: 800.0,
            seed: 0x5EED,
        }
    }
}

/// What happened during one [`Engine::frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// The frame handed out by the frame loop.
    pub frame: Frame,
    /// Whether the camera is still moving.
    pub moving: bool,
    /// Whether the host should start a batch load now.
    pub load_due: bool,
    /// Items that received `load_content` this frame.
    pub loaded: usize,
}

#[derive(Clone, Debug)]
struct Hold {
    item: ItemId,
    origin: Point,
    cluster: Cluster<ItemId>,
}

/// Single owner of the plane: items, camera, gestures, clusters,
/// expansions, and loading.
///
/// The host forwards pointer and wheel input, calls [`Engine::frame`] once
/// per display frame, and performs batch loads when a frame reports
/// `load_due`. Everything the host should draw goes out through the
/// [`Renderer`].
#[derive(Debug)]
pub struct Engine<R> {
    config: EngineConfig,
    world: World,
    placer: Placer,
    camera: Camera,
    gestures: GestureClassifier<ItemId>,
    hold: Option<Hold>,
    expanded: ExpandedSet<ItemId>,
    loader: BatchLoader,
    lazy: LazyLoader,
    frames: FrameLoop,
    viewport: Size,
    renderer: R,
}

impl<R: Renderer> Engine<R> {
    /// Creates a stopped engine with an empty world.
    pub fn new(config: EngineConfig, renderer: R) -> Self {
        Self {
            world: World::new(
                config.world_size,
                config.placement.cell_size,
                config.item_extent,
            ),
            placer: Placer::new(config.placement, config.seed),
            camera: Camera::new(config.pan),
            gestures: GestureClassifier::new(config.gesture),
            hold: None,
            expanded: ExpandedSet::new(),
            loader: BatchLoader::new(config.loader),
            lazy: LazyLoader::new(config.lazy_margin),
            frames: FrameLoop::new(),
            viewport: config.viewport,
            renderer,
            config,
        }
    }

    /// The configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Items, registry, and occupancy.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Where the gesture classifier is.
    #[must_use]
    pub fn gesture_state(&self) -> &GestureState<ItemId> {
        self.gestures.state()
    }

    /// The active hold cluster, if an item is held.
    #[must_use]
    pub fn cluster(&self) -> Option<&Cluster<ItemId>> {
        self.hold.as_ref().map(|hold| &hold.cluster)
    }

    /// Expanded items in expansion order.
    #[must_use]
    pub fn expanded(&self) -> &ExpandedSet<ItemId> {
        &self.expanded
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Consumes the engine and returns the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Updates the viewport size (e.g. on window resize).
    pub fn set_viewport(&mut self, viewport: Size) {
        if viewport.is_finite() {
            self.viewport = viewport;
        }
    }

    /// Returns `true` while frames and periodic loads are running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    /// Returns `true` while a batch load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loader.is_in_flight()
    }

    /// Starts ticking and the periodic load schedule. The first frame after
    /// starting reports a load as due.
    pub fn start(&mut self, now: u64) {
        self.frames.start();
        self.loader.start(now);
        info!(now, "engine started");
    }

    /// Stops ticking and periodic loads. Idempotent.
    pub fn stop(&mut self) {
        if self.frames.is_running() {
            info!(frames = self.frames.frames(), "engine stopped");
        }
        self.frames.stop();
        self.loader.stop();
    }

    /// Runs one frame: long-press timer, load schedule, inertia then
    /// smoothing, renderer offset, and lazy-load triggers, in that order.
    ///
    /// Returns `None` while stopped.
    pub fn frame(&mut self, now: u64) -> Option<FrameReport> {
        let frame = self.frames.begin(now)?;
        if let Some(event) = self.gestures.poll_timer(now) {
            self.dispatch(event);
        }
        let load_due = self.loader.poll(now);
        let moving = if frame.elapsed == 0 {
            self.camera.tick()
        } else {
            self.camera.advance(frame.elapsed as f64)
        };
        self.renderer.set_offset(self.camera.view());

        let visible = self.camera.visible_world_rect(self.viewport);
        let renderer = &mut self.renderer;
        let loaded = self.lazy.scan(
            self.world.items(),
            visible,
            self.world.item_extent(),
            |item| renderer.load_content(item),
        );
        trace!(index = frame.index, moving, load_due, loaded, "frame");
        Some(FrameReport {
            frame,
            moving,
            load_due,
            loaded,
        })
    }

    /// Pointer press at `screen` (viewport pixels).
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        screen: Point,
        now: u64,
    ) -> Option<GestureEvent<ItemId>> {
        let world_point = self.camera.screen_to_world(screen, self.viewport);
        let hit = self.world.hit_test(world_point);
        let event = self.gestures.pointer_down(pointer, screen, hit, now)?;
        self.dispatch(event);
        Some(event)
    }

    /// Pointer motion to `screen`.
    pub fn pointer_move(
        &mut self,
        pointer: PointerId,
        screen: Point,
    ) -> Option<GestureEvent<ItemId>> {
        let event = self.gestures.pointer_move(pointer, screen)?;
        self.dispatch(event);
        Some(event)
    }

    /// Pointer release at `screen`.
    ///
    /// A release away from the last move position is applied as a final
    /// move first, and a long-press that came due since the last frame
    /// starts its hold, so the released gesture ends where the pointer did.
    pub fn pointer_up(
        &mut self,
        pointer: PointerId,
        screen: Point,
        now: u64,
    ) -> Option<GestureEvent<ItemId>> {
        if self.gestures.state().pointer() == Some(pointer) {
            if self.gestures.last_position() != Some(screen) {
                if let Some(event) = self.gestures.pointer_move(pointer, screen) {
                    self.dispatch(event);
                }
            }
            if let Some(event) = self.gestures.poll_timer(now) {
                self.dispatch(event);
            }
        }
        let event = self.gestures.pointer_up(pointer, screen, now)?;
        self.dispatch(event);
        Some(event)
    }

    /// Pointer capture lost.
    pub fn pointer_cancel(&mut self, pointer: PointerId) -> Option<GestureEvent<ItemId>> {
        let event = self.gestures.pointer_cancel(pointer)?;
        self.dispatch(event);
        Some(event)
    }

    /// Wheel input. With `remap_vertical` (typically Shift held) the
    /// vertical delta pans horizontally as well as vertically.
    pub fn wheel(&mut self, delta: Vec2, remap_vertical: bool) {
        self.camera.wheel(delta, remap_vertical);
    }

    /// Animates the camera back to the origin.
    pub fn recenter(&mut self) {
        self.camera.recenter();
    }

    /// Expands or collapses `item`. Returns `None` for unknown items.
    ///
    /// Expanding marks the item expanded and topmost, then pushes every
    /// other non-expanded item within the expand radius out onto the
    /// alternating rings around it. Collapsing only clears the flags: displaced items
    /// stay where they are.
    pub fn toggle_expand(&mut self, item: ItemId) -> Option<Toggle> {
        let focus = self.world.get(item)?.position();
        let toggle = self.expanded.toggle(item);
        match toggle {
            Toggle::Expanded => {
                self.world
                    .insert_flags(item, ItemFlags::EXPANDED | ItemFlags::TOPMOST);
                self.notify(item);
                let expanded = &self.expanded;
                let moves = radial_spread(
                    focus,
                    self.world
                        .positions()
                        .filter(|(id, _)| *id != item && !expanded.contains(id)),
                    &self.config.expand,
                );
                self.apply_moves(&moves);
                debug!(?item, displaced = moves.len(), "item expanded");
            }
            Toggle::Collapsed => {
                self.world.remove_flags(item, ItemFlags::EXPANDED);
                self.settle_topmost(item);
                self.notify(item);
                debug!(?item, "item collapsed");
            }
        }
        Some(toggle)
    }

    /// Collapses every expanded item without restoring any positions.
    /// Returns how many were collapsed.
    pub fn collapse_all(&mut self) -> usize {
        let collapsed = self.expanded.clear();
        for &item in &collapsed {
            self.world.remove_flags(item, ItemFlags::EXPANDED);
            self.settle_topmost(item);
            self.notify(item);
        }
        if !collapsed.is_empty() {
            debug!(count = collapsed.len(), "collapsed all");
        }
        collapsed.len()
    }

    /// Tray entries for the expanded items, in expansion order.
    #[must_use]
    pub fn tray(&self) -> Vec<TrayEntry<ItemId>> {
        self.expanded
            .tray(|id| self.world.get(id).map(Item::position))
    }

    /// Centers the camera on an expanded item. Returns `false` if `item` is
    /// not expanded.
    pub fn activate_tray(&mut self, item: ItemId) -> bool {
        if !self.expanded.contains(&item) {
            return false;
        }
        let Some(position) = self.world.get(item).map(Item::position) else {
            return false;
        };
        self.camera.center_on(position);
        true
    }

    /// Starts a batch load, or returns `None` while one is in flight.
    pub fn begin_load(&mut self) -> Option<BatchTicket> {
        let ticket = self.loader.begin();
        if ticket.is_none() {
            debug!("batch load already in flight");
        }
        ticket
    }

    /// Finishes the load started with `ticket`.
    ///
    /// A failed or empty response leaves the world untouched. Otherwise the
    /// bounds grow once and at most `max_per_batch` identifiers are placed in
    /// order; new items are attached to the renderer.
    pub fn complete_load(
        &mut self,
        ticket: BatchTicket,
        response: Result<Vec<String>, SourceError>,
    ) -> Result<BatchReport, SourceError> {
        if !self.loader.finish(ticket) {
            warn!("ignoring completion of a load that is not in flight");
            return Ok(BatchReport::default());
        }
        let identifiers = response.inspect_err(|err| warn!(error = %err, "batch load failed"))?;
        let mut report = BatchReport {
            received: identifiers.len(),
            ..BatchReport::default()
        };
        if identifiers.is_empty() {
            debug!("content source returned no identifiers");
            return Ok(report);
        }

        self.world.grow(self.config.loader.growth);
        report.grew = true;
        let view_center = self.camera.focus_point();
        for source in identifiers.iter().take(self.config.loader.max_per_batch) {
            report.consumed += 1;
            match self.placer.place(&mut self.world, source, view_center) {
                Placement::Placed(id) => {
                    report.placed += 1;
                    if let Some(item) = self.world.get(id) {
                        self.renderer.attach(item);
                    }
                }
                Placement::Duplicate(_) => report.duplicates += 1,
                Placement::Crowded => {
                    report.crowded += 1;
                    trace!(source = source.as_str(), "placement dropped: area crowded");
                }
            }
        }
        info!(
            received = report.received,
            placed = report.placed,
            duplicates = report.duplicates,
            crowded = report.crowded,
            total = self.world.len(),
            "batch placed"
        );
        Ok(report)
    }

    /// Runs a whole load synchronously against `source`.
    ///
    /// Returns `Ok(None)` without calling the source while another load is in
    /// flight.
    pub fn load_from<S>(&mut self, source: &mut S) -> Result<Option<BatchReport>, SourceError>
    where
        S: ContentSource + ?Sized,
    {
        let Some(ticket) = self.begin_load() else {
            return Ok(None);
        };
        let response = source.list_items(ticket.limit());
        self.complete_load(ticket, response).map(Some)
    }

    fn dispatch(&mut self, event: GestureEvent<ItemId>) {
        match event {
            GestureEvent::PanStart { at, .. } => self.camera.begin_drag(at),
            GestureEvent::PanMove { at, .. } => self.camera.drag_to(at),
            GestureEvent::HoldStart { item, .. } => self.begin_hold(item),
            GestureEvent::HoldMove { item, offset, .. } => self.move_hold(item, offset),
            GestureEvent::End(outcome) => self.finish_gesture(outcome),
        }
    }

    fn begin_hold(&mut self, item: ItemId) {
        self.camera.cancel_drag();
        let Some(origin) = self.world.get(item).map(Item::position) else {
            return;
        };
        self.world
            .insert_flags(item, ItemFlags::HELD | ItemFlags::TOPMOST);
        self.notify(item);
        let cluster = Cluster::gather(item, origin, self.world.positions(), &self.config.cluster);
        debug!(?item, members = cluster.members().len(), "hold started");
        self.hold = Some(Hold {
            item,
            origin,
            cluster,
        });
        self.arrange_cluster(false);
    }

    fn move_hold(&mut self, item: ItemId, offset: Vec2) {
        let Some(hold) = self.hold.as_mut() else {
            return;
        };
        if hold.item != item {
            return;
        }
        let to = hold.origin + offset;
        hold.cluster.recenter(to);
        self.world.set_position(item, to);
        self.notify(item);
        self.arrange_cluster(true);
    }

    fn finish_gesture(&mut self, outcome: GestureOutcome<ItemId>) {
        match outcome {
            GestureOutcome::Pan => self.camera.end_drag(),
            GestureOutcome::Tap(item) => {
                self.camera.cancel_drag();
                self.toggle_expand(item);
            }
            GestureOutcome::Hold(item) | GestureOutcome::ItemDrag(item) => {
                self.camera.cancel_drag();
                self.end_hold(item);
            }
        }
        debug!(?outcome, "gesture ended");
    }

    fn end_hold(&mut self, item: ItemId) {
        self.hold = None;
        self.world.remove_flags(item, ItemFlags::HELD);
        self.settle_topmost(item);
        self.notify(item);
    }

    /// Moves members onto their slots and, when `push_others` is set, pushes
    /// every non-member out of the exclusion zone.
    fn arrange_cluster(&mut self, push_others: bool) {
        let Some(hold) = self.hold.as_ref() else {
            return;
        };
        let mut moves: Vec<(ItemId, Point)> = hold.cluster.slots().collect();
        if push_others {
            moves.extend(
                self.world
                    .items()
                    .iter()
                    .filter(|item| !hold.cluster.contains(&item.id()))
                    .filter_map(|item| hold.cluster.push(item.position()).map(|to| (item.id(), to))),
            );
        }
        self.apply_moves(&moves);
    }

    fn apply_moves(&mut self, moves: &[(ItemId, Point)]) {
        for &(id, to) in moves {
            self.world.set_position(id, to);
            self.notify(id);
        }
    }

    /// TOPMOST follows HELD or EXPANDED.
    fn settle_topmost(&mut self, item: ItemId) {
        let keep = self
            .world
            .get(item)
            .is_some_and(|i| i.is_held() || i.is_expanded());
        if !keep {
            self.world.remove_flags(item, ItemFlags::TOPMOST);
        }
    }

    fn notify(&mut self, id: ItemId) {
        if let Some(item) = self.world.get(id) {
            self.renderer.reposition(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use strewn_gesture::PointerId;

    use super::{Engine, EngineConfig};
    use crate::item::ItemFlags;
    use crate::render::NullRenderer;

    fn engine() -> Engine<NullRenderer> {
        let config = EngineConfig {
            viewport: Size::new(800.0, 600.0),
            ..EngineConfig::default()
        };
        Engine::new(config, NullRenderer)
    }

    #[test]
    fn partial_json_config_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"item_extent": 100.0, "loader": {"max_per_batch": 5}}"#)
                .unwrap();
        assert_eq!(config.item_extent, 100.0);
        assert_eq!(config.loader.max_per_batch, 5);
        assert_eq!(config.loader.request_limit, 72);
        assert_eq!(config.gesture.long_press_ms, 280);
    }

    #[test]
    fn frames_only_run_while_started() {
        let mut e = engine();
        assert!(e.frame(0).is_none());
        e.start(0);
        let report = e.frame(0).unwrap();
        assert!(report.load_due);
        assert!(!e.frame(16).unwrap().load_due);
        e.stop();
        assert!(e.frame(32).is_none());
    }

    #[test]
    fn hold_marks_item_and_release_clears_it() {
        let mut e = engine();
        let mut source = |_: usize| -> Result<Vec<String>, crate::SourceError> {
            Ok(vec!["only.png".to_owned()])
        };
        e.load_from(&mut source).unwrap();
        let id = e.world().lookup("only.png").unwrap();
        let at = e
            .camera()
            .world_to_screen(e.world().get(id).unwrap().position(), e.viewport());

        e.start(0);
        let p = PointerId(1);
        e.pointer_down(p, at, 0).unwrap();
        e.frame(300);
        let flags = e.world().get(id).unwrap().flags();
        assert!(flags.contains(ItemFlags::HELD | ItemFlags::TOPMOST));
        assert!(e.cluster().is_some());

        e.pointer_up(p, at, 400).unwrap();
        assert!(e.world().get(id).unwrap().flags().is_empty());
        assert!(e.cluster().is_none());
    }
}
