// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use strewn_world::{Item, Renderer};
use tracing::{debug, trace};

/// Renderer that logs what a real one would draw, and counts it.
#[derive(Debug, Default)]
pub(crate) struct LogRenderer {
    pub(crate) attached: usize,
    pub(crate) repositioned: usize,
    pub(crate) loaded: usize,
    pub(crate) offset: Vec2,
}

impl Renderer for LogRenderer {
    fn attach(&mut self, item: &Item) {
        self.attached += 1;
        debug!(id = ?item.id(), source = item.source(), x = item.position().x, y = item.position().y, "attach");
    }

    fn reposition(&mut self, item: &Item) {
        self.repositioned += 1;
        trace!(id = ?item.id(), flags = ?item.flags(), x = item.position().x, y = item.position().y, "reposition");
    }

    fn load_content(&mut self, item: &Item) {
        self.loaded += 1;
        debug!(id = ?item.id(), source = item.source(), "load content");
    }

    fn set_offset(&mut self, view: Vec2) {
        self.offset = view;
    }
}
