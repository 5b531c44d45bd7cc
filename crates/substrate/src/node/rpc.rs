// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON-RPC 2.0 transport seam.
//!
//! The node client only needs a request/response function; retries, timeouts
//! and reconnection belong to whatever implements [`RpcTransport`].

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON-RPC error {code} from {method}: {message}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Invalid response from {method}: {reason}")]
    InvalidResponse { method: String, reason: String },
}

pub trait RpcTransport: Send + Sync {
    /// Send one request and return the `result` member of the response.
    fn request(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send;
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// [`RpcTransport`] over HTTP POST.
#[derive(Debug)]
pub struct HttpTransport {
    url: String,
    client: Client,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn request_body(id: u64, method: &str, params: Vec<Value>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

fn parse_response(method: &str, response: RpcResponse) -> Result<Value, RpcError> {
    if let Some(error) = response.error {
        return Err(RpcError::Rpc {
            method: method.to_string(),
            code: error.code,
            message: error.message,
        });
    }
    // A missing storage entry is returned as `"result": null`.
    Ok(response.result.unwrap_or(Value::Null))
}

impl RpcTransport for HttpTransport {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(id, method, "Sending JSON-RPC request");

        let response = self
            .client
            .post(&self.url)
            .json(&request_body(id, method, params))
            .send()
            .await?
            .error_for_status()?
            .json::<RpcResponse>()
            .await?;

        parse_response(method, response)
    }
}
