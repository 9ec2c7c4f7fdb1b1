// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless Strewn session.
//!
//! Builds a catalog from a synthetic index page, then replays a scripted
//! pointer session against the engine while loads come due. Set `RUST_LOG`
//! (e.g. `RUST_LOG=strewn_world=debug`) to see more.
//!
//! ```text
//! strewn-demo [config.toml]
//! ```

mod config;
mod renderer;
mod script;

use std::path::PathBuf;

use anyhow::Context as _;
use strewn_world::Engine;
use strewn_world::actions::{ReverseSearch, download_url, is_allowed_source};
use strewn_world::source::{ShuffledCatalog, collect_image_links};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::DemoConfig;
use crate::renderer::LogRenderer;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DemoConfig::load(&path)?,
        None => DemoConfig::default(),
    };
    let index = Url::parse(&config.index_url)
        .with_context(|| format!("invalid index_url {:?}", config.index_url))?;

    let hrefs = config.index_hrefs();
    let links: Vec<String> = collect_image_links(&index, hrefs.iter().map(String::as_str))
        .into_iter()
        .filter(|link| is_allowed_source(&index, link))
        .collect();
    info!(hrefs = hrefs.len(), links = links.len(), "catalog built");
    let mut catalog = ShuffledCatalog::new(links, config.engine.seed);

    let mut engine = Engine::new(config.engine.clone(), LogRenderer::default());
    let stats = script::run(
        &mut engine,
        &mut catalog,
        &script::default_script(),
        config.duration_ms,
        config.frame_ms,
    );

    let camera = engine.camera().debug_info();
    info!(
        frames = stats.frames,
        batches = stats.batches,
        gestures = stats.gestures,
        items = engine.world().len(),
        occupied_cells = engine.world().grid().occupied_cells(),
        bounds = ?engine.world().bounds(),
        ?camera,
        "session finished"
    );
    let renderer = engine.renderer();
    info!(
        attached = renderer.attached,
        repositioned = renderer.repositioned,
        loaded = renderer.loaded,
        offset = ?renderer.offset,
        "renderer totals"
    );

    if let Some(item) = engine.world().items().first() {
        let download = download_url(&index, item.source()).context("building download link")?;
        let search = ReverseSearch::default()
            .url(&index, item.source())
            .context("building reverse search link")?;
        info!(source = item.source(), %download, %search, "actions for the first item");
    }
    Ok(())
}
