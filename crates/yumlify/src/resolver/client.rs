//! yUML HTTP client
//!
//! Posts a fragment to the rendering service and returns the raw response
//! body. Failures are returned as-is; there is no retry.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, span, Instrument, Level};

use super::config::ResolverConfig;
use crate::core::{DiagramError, DiagramStyle};

/// Remote service that turns fragments into rendered diagrams
#[async_trait]
pub trait DiagramService: Send + Sync {
    /// Submit `fragment` drawn with `style`, returning the response body
    async fn submit(&self, style: &DiagramStyle, fragment: &str) -> Result<String, DiagramError>;
}

/// Client for the yUML class diagram endpoint
pub struct YumlClient {
    client: Client,
    endpoint: String,
}

impl YumlClient {
    pub fn new(config: &ResolverConfig) -> Result<Self, DiagramError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// `{endpoint}/{style-fragment}/class/`
    pub fn class_url(&self, style: &DiagramStyle) -> String {
        format!(
            "{}/{}/class/",
            self.endpoint.trim_end_matches('/'),
            style.fragment()
        )
    }
}

#[async_trait]
impl DiagramService for YumlClient {
    async fn submit(&self, style: &DiagramStyle, fragment: &str) -> Result<String, DiagramError> {
        let url = self.class_url(style);
        let request_span = span!(
            Level::DEBUG,
            "submit_fragment",
            %url,
            fragment_len = fragment.len()
        );

        async move {
            let body = self
                .client
                .post(&url)
                .form(&[("dsl_text", fragment)])
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            debug!(body_len = body.len(), "Diagram service responded");
            Ok(body)
        }
        .instrument(request_span)
        .await
    }
}
