// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fixed pointer choreography replayed against the engine.

use kurbo::{Point, Vec2};
use strewn_world::{ContentSource, Engine, GestureEvent, ItemId, PointerId, Renderer};
use tracing::{debug, info, warn};

/// Where a press lands.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Target {
    /// A fixed screen position.
    Screen(Point),
    /// The most recently placed item.
    Newest,
    /// The first item ever placed.
    Oldest,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Action {
    Press(Target),
    MoveBy(Vec2),
    Release,
    Wheel { delta: Vec2, remap_vertical: bool },
    ActivateTray,
    CollapseAll,
    Recenter,
}

/// The default session: a flick, a tap, a long-press drag, a shifted wheel
/// turn, then the tray and recentering.
pub(crate) fn default_script() -> Vec<(u64, Action)> {
    use Action::*;
    vec![
        (1_000, Press(Target::Screen(Point::new(60.0, 60.0)))),
        (1_050, MoveBy(Vec2::new(80.0, 30.0))),
        (1_100, MoveBy(Vec2::new(120.0, 40.0))),
        (1_116, Release),
        (3_000, Press(Target::Newest)),
        (3_080, Release),
        (4_000, Press(Target::Oldest)),
        (4_400, MoveBy(Vec2::new(150.0, 60.0))),
        (4_600, MoveBy(Vec2::new(40.0, -20.0))),
        (4_800, Release),
        (6_000, Wheel {
            delta: Vec2::new(0.0, 240.0),
            remap_vertical: true,
        }),
        (8_000, ActivateTray),
        (10_000, CollapseAll),
        (12_000, Recenter),
    ]
}

/// Replays `script` while stepping frames every `frame_ms` until
/// `duration_ms`, and runs a load against `source` whenever one is due.
pub(crate) fn run<R, S>(
    engine: &mut Engine<R>,
    source: &mut S,
    script: &[(u64, Action)],
    duration_ms: u64,
    frame_ms: u64,
) -> Stats
where
    R: Renderer,
    S: ContentSource,
{
    let pointer = PointerId(1);
    let mut cursor: Option<Point> = None;
    let mut next = 0;
    let mut stats = Stats::default();

    engine.start(0);
    let mut now = 0;
    while now <= duration_ms {
        while let Some(&(at, action)) = script.get(next) {
            if at > now {
                break;
            }
            next += 1;
            if let Some(GestureEvent::End(outcome)) =
                perform(engine, pointer, &mut cursor, action, now)
            {
                info!(?outcome, now, "gesture");
                stats.gestures += 1;
            }
        }

        if let Some(report) = engine.frame(now) {
            stats.frames += 1;
            if report.load_due {
                match engine.load_from(source) {
                    Ok(Some(batch)) => {
                        stats.batches += 1;
                        debug!(?batch, "load complete");
                    }
                    Ok(None) => {}
                    Err(err) => warn!(error = %err, "load failed"),
                }
            }
        }
        now += frame_ms;
    }
    engine.stop();
    stats
}

fn perform<R: Renderer>(
    engine: &mut Engine<R>,
    pointer: PointerId,
    cursor: &mut Option<Point>,
    action: Action,
    now: u64,
) -> Option<GestureEvent<ItemId>> {
    match action {
        Action::Press(target) => {
            let at = resolve(engine, target)?;
            *cursor = Some(at);
            engine.pointer_down(pointer, at, now)
        }
        Action::MoveBy(delta) => {
            let at = (*cursor)? + delta;
            *cursor = Some(at);
            engine.pointer_move(pointer, at)
        }
        Action::Release => {
            let at = cursor.take()?;
            engine.pointer_up(pointer, at, now)
        }
        Action::Wheel {
            delta,
            remap_vertical,
        } => {
            engine.wheel(delta, remap_vertical);
            None
        }
        Action::ActivateTray => {
            let entry = engine.tray().first().copied()?;
            engine.activate_tray(entry.item);
            info!(item = ?entry.item, "jumped to tray entry");
            None
        }
        Action::CollapseAll => {
            let count = engine.collapse_all();
            info!(count, "collapsed");
            None
        }
        Action::Recenter => {
            engine.recenter();
            None
        }
    }
}

fn resolve<R: Renderer>(engine: &Engine<R>, target: Target) -> Option<Point> {
    let item = match target {
        Target::Screen(at) => return Some(at),
        Target::Newest => engine.world().items().last()?,
        Target::Oldest => engine.world().items().first()?,
    };
    Some(
        engine
            .camera()
            .world_to_screen(item.position(), engine.viewport()),
    )
}

/// Counters for the end-of-session summary.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Stats {
    pub(crate) frames: u64,
    pub(crate) batches: u64,
    pub(crate) gestures: u64,
}
