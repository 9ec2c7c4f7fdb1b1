// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where identifiers come from.
//!
//! The engine only ever asks a [`ContentSource`] for "up to `limit`
//! identifiers". This module also carries the pieces a source typically
//! needs: the JSON [`Listing`] envelope, harvesting image links out of an
//! index page, and an in-memory [`ShuffledCatalog`] that serves random
//! samples of a fixed link list.

use hashbrown::HashSet;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::actions::proxy_url;

/// Smallest listing size a source serves.
pub const MIN_LISTING_LIMIT: usize = 1;
/// Largest listing size a source serves.
pub const MAX_LISTING_LIMIT: usize = 200;

/// File extensions recognized as images (lowercase, with the dot).
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// Failure to obtain a listing.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source could not be reached or refused the request.
    #[error("content source unavailable: {0}")]
    Unavailable(String),
    /// The listing body was not valid JSON of the expected shape.
    #[error("malformed listing: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A URL in the request or the listing could not be parsed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Supplier of item identifiers.
///
/// Implemented for any `FnMut(usize) -> Result<Vec<String>, SourceError>`,
/// so tests and small hosts can pass a closure.
pub trait ContentSource {
    /// Returns up to `limit` identifiers. Order matters: the engine consumes
    /// them front to back.
    fn list_items(&mut self, limit: usize) -> Result<Vec<String>, SourceError>;
}

impl<F> ContentSource for F
where
    F: FnMut(usize) -> Result<Vec<String>, SourceError>,
{
    fn list_items(&mut self, limit: usize) -> Result<Vec<String>, SourceError> {
        self(limit)
    }
}

/// JSON body of a listing response:
/// `{"images": [...], "count": n, "refreshed": bool}`.
///
/// Missing fields take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    /// Identifiers, in the order they should be placed.
    pub images: Vec<String>,
    /// Size of the catalog the sample was drawn from.
    pub count: usize,
    /// Whether the catalog was re-fetched to answer this request.
    pub refreshed: bool,
}

impl Listing {
    /// Parses a listing body.
    pub fn from_json(body: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Serializes the listing.
    pub fn to_json(&self) -> Result<String, SourceError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Clamps a requested listing size to
/// [`MIN_LISTING_LIMIT`]`..=`[`MAX_LISTING_LIMIT`].
#[must_use]
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_LISTING_LIMIT, MAX_LISTING_LIMIT)
}

/// Returns `true` if `href` names an image by extension (case-insensitive).
#[must_use]
pub fn is_image_link(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Harvests image links from the `href`s of an index page.
///
/// Each non-empty, trimmed `href` with an image extension is resolved against
/// `base`. Links that fail to resolve or carry a query string are skipped,
/// and duplicates are dropped keeping the first occurrence.
pub fn collect_image_links<'a, I>(base: &Url, hrefs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for href in hrefs {
        let href = href.trim();
        if href.is_empty() || !is_image_link(href) {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if resolved.query().is_some() {
            continue;
        }
        let resolved = String::from(resolved);
        if seen.insert(resolved.clone()) {
            links.push(resolved);
        }
    }
    links
}

/// In-memory catalog answering listings with a fresh random sample.
///
/// Each listing shuffles the catalog, takes the first `clamp_limit(limit)`
/// links, and rewrites them through [`proxy_url`] so the host serves them
/// from its own origin.
#[derive(Clone, Debug)]
pub struct ShuffledCatalog {
    links: Vec<String>,
    rng: SmallRng,
    served: bool,
}

impl ShuffledCatalog {
    /// Creates a catalog over `links` with a deterministic shuffle.
    #[must_use]
    pub fn new(links: Vec<String>, seed: u64) -> Self {
        Self {
            links,
            rng: SmallRng::seed_from_u64(seed),
            served: false,
        }
    }

    /// Number of links in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` for an empty catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Replaces the catalog; the next listing reports `refreshed`.
    pub fn refresh(&mut self, links: Vec<String>) {
        self.links = links;
        self.served = false;
    }

    /// Draws a listing of up to `limit` proxied links.
    pub fn listing(&mut self, limit: usize) -> Listing {
        let refreshed = !self.served;
        self.served = true;
        let mut sample = self.links.clone();
        sample.shuffle(&mut self.rng);
        sample.truncate(clamp_limit(limit));
        Listing {
            images: sample.iter().map(|link| proxy_url(link)).collect(),
            count: self.links.len(),
            refreshed,
        }
    }
}

impl ContentSource for ShuffledCatalog {
    fn list_items(&mut self, limit: usize) -> Result<Vec<String>, SourceError> {
        Ok(self.listing(limit).images)
    }
}
