//! HTTP module
//!
//! `HttpClient` is the seam between the API layer and the network. The
//! browser implementation drives `window.fetch` through `web_sys`; tests
//! script responses with `MockHttpClient`.

use emotion_shared::HttpMethod;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// HTTP transport errors
#[derive(Debug)]
pub enum HttpError {
    /// The request could not be built
    RequestBuildFailed(String),
    /// fetch rejected (offline, DNS, CORS, ...)
    NetworkError(String),
    /// The response body could not be read
    ResponseReadFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "request build failed: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "network error: {}", msg),
            HttpError::ResponseReadFailed(msg) => write!(f, "response read failed: {}", msg),
        }
    }
}

/// Outgoing request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    #[cfg(test)]
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Fully read response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// (?Send): JS futures are not `Send`
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// Browser implementation
// =========================================================

/// `window.fetch` client. One attempt per call, no timeout.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchClient;

impl FetchClient {
    async fn read_text(response: Response) -> Result<String, HttpError> {
        let promise = response
            .text()
            .map_err(|e| HttpError::ResponseReadFailed(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseReadFailed(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| HttpError::ResponseReadFailed("body is not a string".to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("Headers: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("header {}: {:?}", key, e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("no window object".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ResponseReadFailed(format!("not a Response: {:?}", e)))?;

        let status = response.status();
        let body = Self::read_text(response).await?;
        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// Test utilities: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Default)]
pub struct MockHttpClient {
    // path suffix -> (status, body); a missing entry fails like an offline network
    responses: std::cell::RefCell<std::collections::HashMap<String, (u16, String)>>,
    pub requests: std::cell::RefCell<Vec<HttpRequest>>,
    // scheduler yields before each answer, to model a slow backend
    delay: usize,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, status: u16, body: serde_json::Value) -> Self {
        self.responses
            .borrow_mut()
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    pub fn respond_raw(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    pub fn with_delay(mut self, yields: usize) -> Self {
        self.delay = yields;
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }

    pub fn body_of(&self, index: usize) -> serde_json::Value {
        let requests = self.requests.borrow();
        let body = requests[index].body.as_deref().unwrap_or("null");
        serde_json::from_str(body).unwrap()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let matched = self
            .responses
            .borrow()
            .iter()
            .find(|(path, _)| req.url.ends_with(path.as_str()))
            .map(|(_, resp)| resp.clone());
        self.requests.borrow_mut().push(req);

        for _ in 0..self.delay {
            tokio::task::yield_now().await;
        }

        match matched {
            Some((status, body)) => Ok(HttpResponse { status, body }),
            None => Err(HttpError::NetworkError("TypeError: Failed to fetch".to_string())),
        }
    }
}
