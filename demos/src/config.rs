// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs;
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use strewn_world::EngineConfig;

/// Settings for one headless session. Every field is optional in the file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct DemoConfig {
    /// Engine tunables.
    pub(crate) engine: EngineConfig,
    /// Index page the synthetic catalog pretends to have scraped.
    pub(crate) index_url: String,
    /// Number of image links on the synthetic index page.
    pub(crate) catalog_size: usize,
    /// Session length in host milliseconds.
    pub(crate) duration_ms: u64,
    /// Host frame period.
    pub(crate) frame_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            index_url: "http://127.0.0.1:8080/gallery/".to_owned(),
            catalog_size: 160,
            duration_ms: 20_000,
            frame_ms: 16,
        }
    }
}

impl DemoConfig {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(contents)?;
        config.frame_ms = config.frame_ms.max(1);
        Ok(config)
    }

    /// Hrefs of the synthetic index page: mostly images, plus the noise a
    /// real directory listing has.
    pub(crate) fn index_hrefs(&self) -> Vec<String> {
        let mut hrefs = vec!["../".to_owned(), "README.txt".to_owned()];
        for i in 0..self.catalog_size {
            let ext = match i % 4 {
                0 => "jpg",
                1 => "png",
                2 => "webp",
                _ => "GIF",
            };
            hrefs.push(format!("photo-{i:04}.{ext}"));
            if i % 10 == 0 {
                hrefs.push(format!("thumbs/photo-{i:04}.jpg?w=64"));
            }
        }
        hrefs
    }
}
