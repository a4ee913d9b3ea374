//! HTTP client for the advice API.
//!
//! Adapts the Anthropic Messages API as the copilot's advice function. Each
//! `advise` call is a single non-streaming request whose system prompt
//! carries a compact rendering of the catalog and the shopper's cart.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::CopilotConfig;

use super::error::{AdviceError, ApiErrorResponse};
use super::types::{ChatRequest, ChatResponse, Message};
use super::{AdviceContext, AdviceProvider};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Advice API client.
#[derive(Clone)]
pub struct AdvisorClient {
    inner: Arc<AdvisorClientInner>,
}

struct AdvisorClientInner {
    client: reqwest::Client,
    model: String,
}

impl AdvisorClient {
    /// Create a new advice client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &CopilotConfig) -> Result<Self, AdviceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(|e| AdviceError::Parse(format!("invalid API key format: {e}")))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner: Arc::new(AdvisorClientInner {
                client,
                model: config.model.clone(),
            }),
        })
    }

    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> AdviceError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return AdviceError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return AdviceError::Unauthorized("invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => serde_json::from_str::<ApiErrorResponse>(&body).map_or(
                AdviceError::Api {
                    error_type: "unknown".to_string(),
                    message: body,
                },
                |api_error| AdviceError::Api {
                    error_type: api_error.error.error_type,
                    message: api_error.error.message,
                },
            ),
            Err(e) => AdviceError::Http(e),
        }
    }
}

#[async_trait]
impl AdviceProvider for AdvisorClient {
    #[instrument(skip(self, query, context), fields(model = %self.inner.model))]
    async fn advise(&self, query: &str, context: &AdviceContext) -> Result<String, AdviceError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: query.to_string(),
            }],
            system: Some(build_system_prompt(context)),
        };

        let response = self
            .inner
            .client
            .post(API_URL)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| AdviceError::Parse(format!("failed to parse response: {e}")))?;
        Ok(parsed.text())
    }
}

/// Render the catalog and cart into the system prompt.
fn build_system_prompt(context: &AdviceContext) -> String {
    let mut prompt = String::from(
        "You are the Verdantia shopping copilot. Recommend products from the \
         catalog below, favoring items that match the shopper's question, \
         budget, and sustainability preferences. Keep answers short.\n\nCatalog:\n",
    );

    for product in &context.products {
        let _ = writeln!(
            prompt,
            "- {} ({}): {}, category {}, rating {:.1} ({} reviews), {} in stock, carbon {}",
            product.name,
            product.id,
            product.price.display(),
            product.category,
            product.rating,
            product.review_count,
            product.stock,
            product.carbon_footprint,
        );
    }

    if context.cart.is_empty() {
        prompt.push_str("\nThe shopper's cart is empty.\n");
    } else {
        prompt.push_str("\nIn the shopper's cart:\n");
        for product in &context.cart {
            let _ = writeln!(prompt, "- {} ({})", product.name, product.price.display());
        }
    }

    prompt
}
