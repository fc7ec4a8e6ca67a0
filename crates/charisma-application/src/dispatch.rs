//! Controller dispatch contract
//!
//! The HTTP layer resolves a controller by registration key at request time
//! and calls [`Controller::handle`] with the method name from the route
//! table. Controllers never see transport types, only [`RequestContext`] in
//! and [`Reply`] out.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use charisma_domain::error::{Error, Result};
use charisma_domain::value_objects::RequestIdentity;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Everything a controller method may read from the request
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Named path parameters
    pub params: HashMap<String, String>,
    /// Decoded query parameters (last value wins)
    pub query: HashMap<String, String>,
    /// Parsed JSON body
    pub body: Option<Value>,
    /// Verified caller identity
    pub identity: Option<RequestIdentity>,
}

impl RequestContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path parameter
    pub fn with_param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn with_query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set the JSON body
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the caller identity
    pub fn with_identity(mut self, identity: RequestIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Required path parameter
    pub fn param(&self, name: &str) -> Result<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::invalid_argument(format!("missing path parameter '{name}'")))
    }

    /// Optional non-empty query parameter
    pub fn query_str(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Optional query parameter parsed with `FromStr`
    pub fn query_parse<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.query_str(name)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| {
                    Error::invalid_argument(format!("invalid query parameter '{name}': {e}"))
                })
            })
            .transpose()
    }

    /// Deserialize the JSON body
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self
            .body
            .clone()
            .ok_or_else(|| Error::invalid_argument("request body is required"))?;
        serde_json::from_value(body)
            .map_err(|e| Error::invalid_argument(format!("invalid request body: {e}")))
    }

    /// The caller identity, or an authentication error for anonymous requests
    pub fn require_identity(&self) -> Result<&RequestIdentity> {
        self.identity
            .as_ref()
            .ok_or_else(|| Error::authentication("authentication required"))
    }
}

/// Controller reply
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl Reply {
    /// Reply with a status and JSON body
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// 200 with a serialized body
    pub fn ok<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::new(200, Some(serde_json::to_value(value)?)))
    }

    /// 201 with a serialized body
    pub fn created<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::new(201, Some(serde_json::to_value(value)?)))
    }

    /// 204 without body
    pub fn no_content() -> Self {
        Self::new(204, None)
    }

    /// 404 with an `{"error": ...}` body
    pub fn not_found(message: &str) -> Self {
        Self::new(404, Some(json!({ "error": message })))
    }
}

/// A registered controller
///
/// `handle` must answer every method the controller's constructible
/// declares and fail with `MethodNotFound` for any other name.
#[async_trait]
pub trait Controller: Send + Sync {
    /// Invoke the named method
    async fn handle(&self, method: &str, ctx: RequestContext) -> Result<Reply>;
}
