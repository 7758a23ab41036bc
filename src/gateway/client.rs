//! API Client
//!
//! reqwest-backed transport for the remote content API. One method per
//! HTTP verb plus a multipart form variant for lead-capture submissions.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::error;
use url::Url;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::gateway::{ApiResponse, RequestOptions};

// == Api Client ==
/// HTTP client bound to the remote API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    // == Constructor ==
    /// Creates a client rooted at `<base_url>/api`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Unknown(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: format!("{}/api", base_url.trim_end_matches('/')),
        })
    }

    /// Creates a client from the data-layer configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url)
    }

    // == Verb Methods ==
    pub async fn get(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::GET, endpoint, None, options).await
    }

    pub async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        self.request(Method::POST, endpoint, Some(body), options)
            .await
    }

    pub async fn put(
        &self,
        endpoint: &str,
        body: &Value,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        self.request(Method::PUT, endpoint, Some(body), options)
            .await
    }

    pub async fn patch(
        &self,
        endpoint: &str,
        body: &Value,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        self.request(Method::PATCH, endpoint, Some(body), options)
            .await
    }

    pub async fn delete(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::DELETE, endpoint, None, options).await
    }

    /// Sends a multipart form body (lead-capture submissions).
    pub async fn post_form(
        &self,
        endpoint: &str,
        fields: Vec<(String, String)>,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let url = self.build_url(endpoint, &options.params)?;

        let mut form = reqwest::multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }

        let mut request = self.http.post(url).multipart(form);
        for (name, value) in &options.headers {
            request = request.header(name, value);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::classify_transport_error(e, endpoint, &Method::POST))?;
        self.decode_response(response, endpoint, &Method::POST).await
    }

    // == Request Core ==
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let url = self.build_url(endpoint, &options.params)?;

        let mut request = self.http.request(method.clone(), url);
        for (name, value) in &options.headers {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::classify_transport_error(e, endpoint, &method))?;
        self.decode_response(response, endpoint, &method).await
    }

    /// Joins the base URL with the endpoint and appends query parameters.
    /// Parameter order is passed through as given.
    fn build_url(&self, endpoint: &str, params: &[(String, String)]) -> Result<Url> {
        let joined = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let mut url = Url::parse(&joined)
            .map_err(|e| ApiError::Unknown(format!("invalid request URL {}: {}", joined, e)))?;

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// Decodes the response body by content type and maps non-2xx
    /// statuses into `RequestFailed`.
    async fn decode_response(
        &self,
        response: reqwest::Response,
        endpoint: &str,
        method: &Method,
    ) -> Result<ApiResponse> {
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);

        let text = response
            .text()
            .await
            .map_err(|e| Self::classify_transport_error(e, endpoint, method))?;

        if !status.is_success() {
            let message = Self::server_message(&text)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            error!(
                endpoint,
                method = %method,
                status = status.as_u16(),
                body = %text,
                "API request failed"
            );
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let data = Self::decode_body(&text, is_json, endpoint, method, status)?;
        let message = data
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("OK")
            .to_string();

        Ok(ApiResponse {
            data,
            status: status.as_u16(),
            success: true,
            message,
        })
    }

    fn decode_body(
        text: &str,
        is_json: bool,
        endpoint: &str,
        method: &Method,
        status: StatusCode,
    ) -> Result<Value> {
        if !is_json {
            return Ok(Value::String(text.to_string()));
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(text).map_err(|e| {
            error!(
                endpoint,
                method = %method,
                status = status.as_u16(),
                body = %text,
                "API response body is not valid JSON"
            );
            ApiError::Unknown(format!("invalid JSON response from {}: {}", endpoint, e))
        })
    }

    /// Pulls the server-provided message out of an error payload, if any.
    fn server_message(body: &str) -> Option<String> {
        serde_json::from_str::<Value>(body)
            .ok()?
            .get("message")?
            .as_str()
            .map(|s| s.to_string())
    }

    /// Timeouts get their own variant; everything else is Unknown.
    fn classify_transport_error(error: reqwest::Error, endpoint: &str, method: &Method) -> ApiError {
        if error.is_timeout() {
            error!(endpoint, method = %method, "API request timed out");
            ApiError::Timeout(format!("{} {}", method, endpoint))
        } else {
            error!(endpoint, method = %method, %error, "API request error");
            ApiError::Unknown(error.to_string())
        }
    }
}
