// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// RPC methods that are never answered from the read cache.
const UNCACHED_METHODS: &[&str] = &[
    "author_submitExtrinsic",
    "payment_queryInfo",
    "state_getMetadata",
];

/// Short-lived cache of read-only RPC results keyed by `(method, params)`.
///
/// Entries older than the TTL are treated as missing, so a value may be at
/// most one TTL stale.
#[derive(Debug)]
pub struct ReadCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, (Instant, Value)>>,
}

impl ReadCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_cacheable(method: &str) -> bool {
        !UNCACHED_METHODS.contains(&method)
    }

    pub fn key(method: &str, params: &[Value]) -> String {
        format!("{}:{}", method, Value::Array(params.to_vec()))
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().ok()?;
        let (stored_at, value) = entries.get(key)?;
        if stored_at.elapsed() < self.ttl {
            Some(value.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, key: String, value: Value) {
        if let Ok(mut entries) = self.entries.write() {
            let ttl = self.ttl;
            entries.retain(|_, (stored_at, _)| stored_at.elapsed() < ttl);
            entries.insert(key, (Instant::now(), value));
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
