//! Route handler dispatching to container-resolved controllers
//!
//! A [`ControllerRoute`] is built for every row of a route table. On each
//! request it collects path parameters, query parameters, the JSON body and
//! the caller identity into a [`RequestContext`], resolves its controller
//! key from the current container and calls the named method. Any failure
//! is answered as a JSON error for this request only.

use std::sync::Arc;

use charisma_application::dispatch::{Controller, Reply, RequestContext};
use charisma_domain::error::{Error, Result};
use rocket::data::Limits;
use rocket::http::{Method, Status};
use rocket::route::{self, Handler};
use rocket::serde::json::Json;
use rocket::{Data, Request, Response};
use tracing::debug;

use crate::auth::Authenticated;
use crate::constants::JSON_LIMIT_NAME;
use crate::error::error_reply;
use crate::handle::ContainerHandle;
use crate::routes::RouteSpec;

/// Handler bound to one `(key, method)` pair
#[derive(Debug, Clone)]
pub struct ControllerRoute {
    key: &'static str,
    method: &'static str,
    /// Position and name of each dynamic path segment
    params: Arc<[(usize, String)]>,
}

impl ControllerRoute {
    /// Create the handler for a route table row
    pub fn new(spec: &RouteSpec) -> Self {
        let params = spec
            .path
            .trim_start_matches('/')
            .split('/')
            .enumerate()
            .filter_map(|(index, segment)| {
                segment
                    .strip_prefix('<')
                    .and_then(|s| s.strip_suffix('>'))
                    .map(|name| (index, name.trim_end_matches("..").to_string()))
            })
            .collect();
        Self {
            key: spec.key,
            method: spec.method,
            params,
        }
    }

    /// Registration key this route dispatches to
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Controller method this route calls
    pub fn method(&self) -> &'static str {
        self.method
    }

    async fn dispatch(&self, req: &Request<'_>, data: Data<'_>) -> Result<Reply> {
        let ctx = self.context(req, data).await?;
        let handle = req
            .rocket()
            .state::<ContainerHandle>()
            .ok_or_else(|| Error::infrastructure("No container handle managed"))?;
        let controller = handle.load().resolve_as::<dyn Controller>(self.key)?;
        controller.handle(self.method, ctx).await
    }

    async fn context(&self, req: &Request<'_>, data: Data<'_>) -> Result<RequestContext> {
        let mut ctx = RequestContext::new();

        let segments: Vec<&str> = req.uri().path().segments().collect();
        for (index, name) in self.params.iter() {
            let value = segments.get(*index).ok_or_else(|| {
                Error::invalid_argument(format!("missing path parameter '{name}'"))
            })?;
            ctx.params.insert(name.clone(), (*value).to_string());
        }

        if let Some(query) = req.uri().query() {
            for (name, value) in query.segments() {
                ctx.query.insert(name.to_string(), value.to_string());
            }
        }

        if matches!(req.method(), Method::Post | Method::Put | Method::Patch) {
            ctx.body = read_json(req, data).await?;
        }

        ctx.identity = Authenticated::of(req);
        Ok(ctx)
    }
}

/// Read the body as JSON; an empty body is `None`
async fn read_json(req: &Request<'_>, data: Data<'_>) -> Result<Option<serde_json::Value>> {
    let limit = req.limits().get(JSON_LIMIT_NAME).unwrap_or(Limits::JSON);
    let raw = data.open(limit).into_string().await?;
    if !raw.is_complete() {
        return Err(Error::invalid_argument(format!(
            "request body exceeds {limit}"
        )));
    }
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| Error::invalid_argument(format!("malformed JSON body: {e}")))
}

fn respond<'r>(req: &'r Request<'_>, reply: Reply) -> route::Outcome<'r> {
    let status = Status::from_code(reply.status).unwrap_or(Status::InternalServerError);
    match reply.body {
        Some(body) => route::Outcome::from(req, (status, Json(body))),
        None => route::Outcome::Success(Response::build().status(status).finalize()),
    }
}

#[rocket::async_trait]
impl Handler for ControllerRoute {
    async fn handle<'r>(&self, req: &'r Request<'_>, data: Data<'r>) -> route::Outcome<'r> {
        match self.dispatch(req, data).await {
            Ok(reply) => {
                debug!(key = self.key, method = self.method, status = reply.status, "Dispatched");
                respond(req, reply)
            }
            Err(e) => {
                let (status, body) = error_reply(&e);
                debug!(key = self.key, method = self.method, status = status.code, error = %e, "Dispatch failed");
                route::Outcome::from(req, (status, Json(body)))
            }
        }
    }
}
