// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item action links.
//!
//! These are pure URL transforms. They never touch engine state, and hosts
//! should stop pointer propagation when one is activated so that it does not
//! also start a gesture.

use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

/// Query parameter that asks the proxy for an attachment disposition.
pub const DOWNLOAD_PARAM: &str = "download";

/// Path of the image proxy endpoint.
pub const PROXY_PATH: &str = "/proxy";

/// Link that downloads `identifier` instead of displaying it.
///
/// `identifier` is resolved against `origin`; the `download` query parameter
/// is set to `1` (replacing any existing value, keeping other parameters),
/// and the result is returned as an origin-relative `path?query`.
pub fn download_url(origin: &Url, identifier: &str) -> Result<String, url::ParseError> {
    let mut url = origin.join(identifier)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != DOWNLOAD_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(DOWNLOAD_PARAM, "1");
    Ok(match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_owned(),
    })
}

/// Routes a remote URL through the local image proxy:
/// `/proxy?url=<form-encoded remote>`.
#[must_use]
pub fn proxy_url(remote: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(remote.as_bytes()).collect();
    format!("{PROXY_PATH}?url={encoded}")
}

/// Returns `true` when `candidate` may be fetched by the proxy: it must parse
/// and share scheme, host, and port with `index`, and its path must start
/// with the index path.
#[must_use]
pub fn is_allowed_source(index: &Url, candidate: &str) -> bool {
    let Ok(candidate) = Url::parse(candidate) else {
        return false;
    };
    candidate.scheme() == index.scheme()
        && candidate.host_str() == index.host_str()
        && candidate.port_or_known_default() == index.port_or_known_default()
        && candidate.path().starts_with(index.path())
}

/// Reverse image search endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverseSearch {
    /// Search endpoint.
    pub endpoint: String,
    /// Query parameter carrying the absolute image URL.
    pub param: String,
}

impl Default for ReverseSearch {
    fn default() -> Self {
        Self {
            endpoint: "https://lens.google.com/uploadbyurl".to_owned(),
            param: "url".to_owned(),
        }
    }
}

impl ReverseSearch {
    /// Search link for `identifier`, resolved against `origin` first so that
    /// relative proxy paths become absolute.
    pub fn url(&self, origin: &Url, identifier: &str) -> Result<Url, url::ParseError> {
        let image = origin.join(identifier)?;
        let mut search = Url::parse(&self.endpoint)?;
        search.query_pairs_mut().append_pair(&self.param, image.as_str());
        Ok(search)
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{ReverseSearch, download_url, is_allowed_source, proxy_url};

    fn origin() -> Url {
        Url::parse("http://localhost:5000/").unwrap()
    }

    #[test]
    fn download_sets_flag_and_keeps_other_params() {
        let link = download_url(&origin(), "/proxy?url=http%3A%2F%2Fa%2Fb.png").unwrap();
        assert_eq!(link, "/proxy?url=http%3A%2F%2Fa%2Fb.png&download=1");

        let replaced = download_url(&origin(), "/img/x.png?download=0&w=3").unwrap();
        assert_eq!(replaced, "/img/x.png?w=3&download=1");

        assert_eq!(
            download_url(&origin(), "plain.gif").unwrap(),
            "/plain.gif?download=1"
        );
    }

    #[test]
    fn proxy_encodes_everything_reserved() {
        assert_eq!(
            proxy_url("http://h/p/a b.png"),
            "/proxy?url=http%3A%2F%2Fh%2Fp%2Fa+b.png"
        );
    }

    #[test]
    fn allow_list_checks_scheme_host_and_path_prefix() {
        let index = Url::parse("http://52.33.176.184/tmdbbd/").unwrap();
        assert!(is_allowed_source(&index, "http://52.33.176.184/tmdbbd/cat.png"));
        assert!(is_allowed_source(&index, "http://52.33.176.184:80/tmdbbd/a/b.jpg"));
        assert!(!is_allowed_source(&index, "https://52.33.176.184/tmdbbd/cat.png"));
        assert!(!is_allowed_source(&index, "http://evil.example/tmdbbd/cat.png"));
        assert!(!is_allowed_source(&index, "http://52.33.176.184/other/cat.png"));
        assert!(!is_allowed_source(&index, "not a url"));
    }

    #[test]
    fn reverse_search_embeds_absolute_image_url() {
        let link = ReverseSearch::default()
            .url(&origin(), "/proxy?url=x")
            .unwrap();
        assert_eq!(
            link.as_str(),
            "https://lens.google.com/uploadbyurl?url=http%3A%2F%2Flocalhost%3A5000%2Fproxy%3Furl%3Dx"
        );
    }
}
