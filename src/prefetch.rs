//! Link prefetch
//!
//! The panel owns a [`PrefetchCache`]: the set of URLs already requested this
//! session. A hover or focus asks the cache for a [`PrefetchRequest`]; the
//! first ask for a URL gets one, every later ask gets nothing. The URL is
//! recorded before anything goes over the wire, so a failed fetch is never
//! retried. Links with nothing to fetch (see [`is_prefetchable`]) are skipped
//! without being recorded.
//!
//! Fetching itself is the host's business, behind [`LinkFetcher`]:
//! - browser: [`LinkTagFetcher`] appends `<link rel="prefetch">` to the head
//! - native: [`ReqwestFetcher`] issues a low-priority GET
//!
//! [`Prefetcher`] runs a request through a fetcher and swallows the outcome.

use crate::error::PrefetchError;
use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefetchPriority {
    #[default]
    Low,
    High,
}

impl PrefetchPriority {
    /// Value for the `fetchpriority` hint.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefetchPriority::Low => "low",
            PrefetchPriority::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrefetchRequest {
    pub url: String,
    pub priority: PrefetchPriority,
}

/// Links with nothing to warm up: mail and phone handlers, in-page fragments.
pub fn is_prefetchable(url: &str) -> bool {
    let url = url.trim();
    !(url.is_empty()
        || url.starts_with('#')
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with("javascript:"))
}

// =============================================================================
// CACHE
// =============================================================================

/// Write-once set of requested URLs. Grows for the life of the panel, never
/// evicts.
#[derive(Debug, Clone, Default)]
pub struct PrefetchCache {
    enabled: bool,
    requested: HashSet<String>,
}

impl PrefetchCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            requested: HashSet::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// First request for `url` this session yields a request; repeats yield
    /// `None`. Non-prefetchable URLs always yield `None` and are not recorded.
    pub fn request(&mut self, url: &str) -> Option<PrefetchRequest> {
        if !self.enabled || !is_prefetchable(url) {
            return None;
        }
        if !self.requested.insert(url.to_string()) {
            return None;
        }
        Some(PrefetchRequest {
            url: url.to_string(),
            priority: PrefetchPriority::Low,
        })
    }

    pub fn contains(&self, url: &str) -> bool {
        self.requested.contains(url)
    }

    pub fn len(&self) -> usize {
        self.requested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }
}

// =============================================================================
// FETCHERS
// =============================================================================

/// Issues the background fetch for one request.
#[async_trait(?Send)]
pub trait LinkFetcher {
    async fn fetch(&self, request: &PrefetchRequest) -> Result<(), PrefetchError>;
}

/// Runs a fetch and drops the result. Failures are logged at debug level.
pub async fn dispatch<F: LinkFetcher + ?Sized>(fetcher: &F, request: PrefetchRequest) {
    match fetcher.fetch(&request).await {
        Ok(()) => tracing::debug!(url = %request.url, "prefetched"),
        Err(err) => tracing::debug!(url = %request.url, error = %err, "prefetch failed"),
    }
}

/// Shares one fetcher between fire-and-forget dispatches.
pub struct Prefetcher<F> {
    fetcher: Rc<F>,
}

impl<F> Clone for Prefetcher<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Rc::clone(&self.fetcher),
        }
    }
}

impl<F: LinkFetcher + 'static> Prefetcher<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Rc::new(fetcher),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Future that performs the request and always resolves to `()`.
    pub fn run(&self, request: PrefetchRequest) -> LocalBoxFuture<'static, ()> {
        let fetcher = Rc::clone(&self.fetcher);
        Box::pin(async move { dispatch(fetcher.as_ref(), request).await })
    }

    /// Fire and forget on the current thread's executor.
    ///
    /// Native hosts must call this from inside a `tokio::task::LocalSet`.
    pub fn spawn(&self, request: PrefetchRequest) {
        let task = self.run(request);

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(task);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            tokio::task::spawn_local(task);
        }
    }
}

/// Native prefetch over HTTP.
#[cfg(not(target_arch = "wasm32"))]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    base: Option<reqwest::Url>,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base: None,
        }
    }

    /// Resolve relative links (e.g. the résumé path) against `base`.
    pub fn with_base(mut self, base: reqwest::Url) -> Self {
        self.base = Some(base);
        self
    }

    fn resolve(&self, url: &str) -> Result<reqwest::Url, PrefetchError> {
        match reqwest::Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(_) => {
                let base = self
                    .base
                    .as_ref()
                    .ok_or_else(|| PrefetchError::Unresolvable(url.to_string()))?;
                base.join(url).map_err(|err| PrefetchError::Transport {
                    url: url.to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl LinkFetcher for ReqwestFetcher {
    async fn fetch(&self, request: &PrefetchRequest) -> Result<(), PrefetchError> {
        let url = self.resolve(&request.url)?;
        let response = self
            .client
            .get(url)
            .header("Sec-Purpose", "prefetch")
            .send()
            .await
            .map_err(|err| PrefetchError::Transport {
                url: request.url.clone(),
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PrefetchError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Browser prefetch: hands the URL to the page as a `<link rel="prefetch">`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkTagFetcher;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl LinkFetcher for LinkTagFetcher {
    async fn fetch(&self, request: &PrefetchRequest) -> Result<(), PrefetchError> {
        let transport = |reason: String| PrefetchError::Transport {
            url: request.url.clone(),
            reason,
        };
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| transport("no document".to_string()))?;
        let head = document.head().ok_or_else(|| transport("no <head>".to_string()))?;

        let link = document
            .create_element("link")
            .map_err(|err| transport(format!("{err:?}")))?;
        for (name, value) in [
            ("rel", "prefetch"),
            ("href", request.url.as_str()),
            ("fetchpriority", request.priority.as_str()),
        ] {
            link.set_attribute(name, value)
                .map_err(|err| transport(format!("{err:?}")))?;
        }
        head.append_child(&link)
            .map_err(|err| transport(format!("{err:?}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingFetcher {
        fail: bool,
        seen: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl LinkFetcher for RecordingFetcher {
        async fn fetch(&self, request: &PrefetchRequest) -> Result<(), PrefetchError> {
            self.seen.borrow_mut().push(request.url.clone());
            if self.fail {
                return Err(PrefetchError::Status {
                    url: request.url.clone(),
                    status: 503,
                });
            }
            Ok(())
        }
    }

    #[test]
    fn second_request_for_same_url_is_suppressed() {
        let mut cache = PrefetchCache::new(true);
        let first = cache.request("https://consulting.mor-gan.com");
        assert_eq!(
            first,
            Some(PrefetchRequest {
                url: "https://consulting.mor-gan.com".into(),
                priority: PrefetchPriority::Low,
            })
        );
        assert_eq!(cache.request("https://consulting.mor-gan.com"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn non_navigational_links_are_skipped() {
        let mut cache = PrefetchCache::new(true);
        assert_eq!(cache.request("mailto:morgan@mor-gan.com"), None);
        assert_eq!(cache.request("#portfolio"), None);
        assert!(cache.is_empty());
        assert!(!cache.contains("mailto:morgan@mor-gan.com"));
    }

    #[test]
    fn disabled_cache_never_requests() {
        let mut cache = PrefetchCache::new(false);
        assert_eq!(cache.request("https://github.com"), None);
        assert!(!cache.contains("https://github.com"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failure_is_swallowed_and_not_retried() {
        let prefetcher = Prefetcher::new(RecordingFetcher {
            fail: true,
            ..Default::default()
        });
        let mut cache = PrefetchCache::new(true);

        for _ in 0..3 {
            if let Some(request) = cache.request("https://github.com") {
                prefetcher.run(request).await;
            }
        }

        assert_eq!(*prefetcher.fetcher().seen.borrow(), vec!["https://github.com".to_string()]);
        assert!(cache.contains("https://github.com"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn spawned_requests_run_on_local_set() {
        let prefetcher = Prefetcher::new(RecordingFetcher::default());
        let local = tokio::task::LocalSet::new();
        let handle = prefetcher.clone();
        local
            .run_until(async move {
                handle.spawn(PrefetchRequest {
                    url: "https://docs.mor-gan.com".into(),
                    priority: PrefetchPriority::Low,
                });
                tokio::task::yield_now().await;
            })
            .await;
        local.await;
        assert_eq!(prefetcher.fetcher().seen.borrow().len(), 1);
    }

    #[test]
    fn relative_url_needs_a_base() {
        let fetcher = ReqwestFetcher::new();
        assert_eq!(
            fetcher.resolve("/Morgan_Salisbury_Resume.pdf"),
            Err(PrefetchError::Unresolvable("/Morgan_Salisbury_Resume.pdf".into()))
        );
        let based = ReqwestFetcher::new().with_base(reqwest::Url::parse("https://mor-gan.com").unwrap());
        assert_eq!(
            based.resolve("/Morgan_Salisbury_Resume.pdf").unwrap().as_str(),
            "https://mor-gan.com/Morgan_Salisbury_Resume.pdf"
        );
    }
}
