//! HTTP client for the storefront REST backend.
//!
//! Wraps `reqwest` with typed resource access and backend error-detail
//! extraction. Each call sends exactly one request. Every request carries a fresh
//! `X-Request-Id` so client log lines can be matched to backend logs.

use std::time::{Duration, Instant};

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shopfront_core::AppConfig;

use crate::error::ApiError;
use crate::health::{HealthReport, Timed};
use crate::resources::Resource;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upper bound on pages walked by [`ApiClient::list_all`].
pub(crate) const MAX_PAGES: usize = 500;

/// Client for the storefront REST API.
///
/// Use [`ApiClient::new`] with an explicit base URL (tests point it at a
/// wiremock server) or [`ApiClient::from_config`] in the binary.
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends to the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_url, config.request_timeout_secs, &config.user_agent)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches one page of a collection.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Status`] on a non-2xx response.
    /// - [`ApiError::Deserialize`] if the body is not a list of `R`.
    pub async fn list<R: Resource>(&self, skip: u64, limit: u32) -> Result<Vec<R>, ApiError> {
        Ok(self.list_timed::<R>(skip, limit, &[]).await?.value)
    }

    /// Fetches one page of a collection with extra query filters, timing the
    /// round trip.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::list`].
    pub async fn list_timed<R: Resource>(
        &self,
        skip: u64,
        limit: u32,
        filters: &[(&str, String)],
    ) -> Result<Timed<Vec<R>>, ApiError> {
        let mut url = self.endpoint(R::PATH, None)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("skip", &skip.to_string());
            pairs.append_pair("limit", &limit.to_string());
            for (key, value) in filters {
                pairs.append_pair(key, value);
            }
        }

        let started = Instant::now();
        let value = self.get_json::<Vec<R>>(url, R::PATH).await?;
        Ok(Timed {
            value,
            elapsed: started.elapsed(),
        })
    }

    /// Walks every page of a collection until a short page is returned.
    ///
    /// All-or-nothing: a failure on any page discards what was fetched so far.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ApiClient::list`]. Returns
    /// [`ApiError::PaginationLimit`] after [`MAX_PAGES`] full pages.
    pub async fn list_all<R: Resource>(&self, page_size: u32) -> Result<Vec<R>, ApiError> {
        let page_size = page_size.max(1);
        let mut all = Vec::new();
        let mut skip = 0u64;

        for _ in 0..MAX_PAGES {
            let page = self.list::<R>(skip, page_size).await?;
            let short = page.len() < usize::try_from(page_size).unwrap_or(usize::MAX);
            all.extend(page);
            if short {
                return Ok(all);
            }
            skip += u64::from(page_size);
        }

        Err(ApiError::PaginationLimit {
            path: format!("/{}", R::PATH),
            max_pages: MAX_PAGES,
        })
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the backend has no such record, or
    /// any error [`ApiClient::list`] can produce.
    pub async fn get<R: Resource>(&self, id: i64) -> Result<R, ApiError> {
        let url = self.endpoint(R::PATH, Some(id))?;
        self.get_json(url, &format!("{} {id}", R::NAME)).await
    }

    /// Creates a record. Sent exactly once.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] carries the backend's rejection detail.
    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R, ApiError> {
        let url = self.endpoint(R::PATH, None)?;
        let body = self.send(Method::POST, &url, Some(draft)).await?;
        parse_body(&body, &format!("created {}", R::NAME))
    }

    /// Replaces a record. Sent exactly once.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown id, [`ApiError::Status`] for
    /// rejections.
    pub async fn update<R: Resource>(&self, id: i64, draft: &R::Draft) -> Result<R, ApiError> {
        let url = self.endpoint(R::PATH, Some(id))?;
        let body = self.send(Method::PUT, &url, Some(draft)).await?;
        parse_body(&body, &format!("updated {} {id}", R::NAME))
    }

    /// Deletes a record. Sent exactly once; the response body is ignored.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown id, [`ApiError::Status`] for
    /// rejections such as foreign-key violations.
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        let url = self.endpoint(R::PATH, Some(id))?;
        self.send(Method::DELETE, &url, None::<&()>).await?;
        Ok(())
    }

    /// Calls `GET /health_check` once and times it.
    ///
    /// A 503 whose body is a health report is returned as a report; a
    /// degraded backend is still a successful health query.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] when the backend is unreachable, [`ApiError::Status`]
    /// for other failures.
    pub async fn health(&self) -> Result<Timed<HealthReport>, ApiError> {
        let url = self.endpoint("health_check", None)?;
        let started = Instant::now();
        let (status, body) = self.send_raw(Method::GET, &url, None::<&()>).await?;
        let elapsed = started.elapsed();

        if status.is_success() || status == StatusCode::SERVICE_UNAVAILABLE {
            if let Ok(report) = serde_json::from_str::<HealthReport>(&body) {
                return Ok(Timed {
                    value: report,
                    elapsed,
                });
            }
        }
        Err(status_error(status, url.path(), &body))
    }

    /// Builds `{base}/{collection}[/{id}]`.
    fn endpoint(&self, collection: &str, id: Option<i64>) -> Result<Url, ApiError> {
        let relative = match id {
            Some(id) => format!("{collection}/{id}"),
            None => collection.to_owned(),
        };
        self.base_url
            .join(&relative)
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, ApiError> {
        let body = self.send(Method::GET, &url, None::<&()>).await?;
        parse_body(&body, context)
    }

    /// Sends a request and returns the body of a 2xx response.
    async fn send<B>(&self, method: Method, url: &Url, body: Option<&B>) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let (status, text) = self.send_raw(method, url, body).await?;
        if status.is_success() {
            return Ok(text);
        }
        Err(status_error(status, url.path(), &text))
    }

    /// Sends a request and returns the status and body, whatever the status.
    async fn send_raw<B>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&B>,
    ) -> Result<(StatusCode, String), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(
            method = %method,
            path = url.path(),
            request_id = %request_id,
            "sending API request"
        );

        let mut request = self
            .client
            .request(method, url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(
                status = status.as_u16(),
                path = url.path(),
                request_id = %request_id,
                "API request failed"
            );
        }
        Ok((status, text))
    }
}

fn status_error(status: StatusCode, path: &str, body: &str) -> ApiError {
    if status == StatusCode::NOT_FOUND {
        return ApiError::NotFound {
            path: path.to_owned(),
        };
    }
    ApiError::Status {
        status: status.as_u16(),
        path: path.to_owned(),
        detail: extract_detail(body),
    }
}

/// Pulls the backend's error message out of a response body.
///
/// Handles `{"detail": "..."}`, validation-error lists of the form
/// `{"detail": [{"msg": "..."}]}`, and plain-text bodies.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_owned());
    };

    match value.get("detail") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .map(|item| {
                    item.get("msg")
                        .and_then(serde_json::Value::as_str)
                        .map_or_else(|| item.to_string(), str::to_owned)
                })
                .collect();
            Some(messages.join("; "))
        }
        Some(other) => Some(other.to_string()),
        None => Some(trimmed.to_owned()),
    }
}

fn parse_body<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
