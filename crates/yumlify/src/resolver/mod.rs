//! Diagram URI resolution
//!
//! Turns a finished fragment into a diagram URL. The cache is consulted
//! first; on a miss the fragment is posted to the rendering service and the
//! URL is derived from its response. Concurrent resolutions of the same
//! fragment are not coordinated, so both may reach the service.

mod cache;
mod client;
mod config;

pub use cache::{FragmentCache, MemoryFragmentCache, MokaFragmentCache};
pub use client::{DiagramService, YumlClient};
pub use config::{
    ResolverConfig, DEFAULT_CACHE_TTL, DEFAULT_ENDPOINT, DEFAULT_IMAGE_HOST, DEFAULT_TIMEOUT,
};

use tracing::{debug, info, warn};

use crate::core::{DiagramError, DiagramStyle};

/// Cache-first resolver from fragments to diagram URLs
pub struct DiagramUriResolver<S, C> {
    service: S,
    cache: C,
    image_host: String,
}

/// Resolver wired to the live yUML service and a moka cache
pub type YumlResolver = DiagramUriResolver<YumlClient, MokaFragmentCache>;

impl YumlResolver {
    pub fn from_config(config: &ResolverConfig) -> Result<Self, DiagramError> {
        Ok(DiagramUriResolver::new(
            YumlClient::new(config)?,
            MokaFragmentCache::new(config.cache_ttl),
            config.image_host.clone(),
        ))
    }
}

impl<S, C> DiagramUriResolver<S, C>
where
    S: DiagramService,
    C: FragmentCache,
{
    pub fn new(service: S, cache: C, image_host: impl Into<String>) -> Self {
        Self {
            service,
            cache,
            image_host: image_host.into(),
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Resolve `fragment` to a diagram URL
    ///
    /// The cache key is the fragment alone: a URL cached for one style is
    /// returned for any other style with the same fragment.
    pub async fn resolve(
        &self,
        fragment: &str,
        style: &DiagramStyle,
    ) -> Result<String, DiagramError> {
        if let Some(url) = self.cache.get(fragment).await {
            debug!(%url, "Diagram URL served from cache");
            return Ok(url);
        }

        info!(style = %style.fragment(), fragment_len = fragment.len(), "Requesting diagram");
        let body = self.service.submit(style, fragment).await?;
        let url = url_from_response(&self.image_host, &body)?;
        self.cache.insert(fragment.to_string(), url.clone()).await;
        Ok(url)
    }
}

/// Derive the diagram URL from a service response such as `a1b2c3.png`
///
/// The part before the first `.` is appended to `image_host`.
pub fn url_from_response(image_host: &str, body: &str) -> Result<String, DiagramError> {
    match body.trim().split_once('.') {
        Some((id, _)) if !id.is_empty() => Ok(format!("{}{}", image_host, id)),
        _ => {
            warn!(body_len = body.len(), "Diagram service returned no identifier");
            Err(DiagramError::malformed_response(body))
        }
    }
}
