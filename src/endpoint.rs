// Copyright 2025 The Views JSON:API Server Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The public `/jsonapi/` endpoint.
//!
//! A single handler serves every projected route: the request path selects
//! the route target, the target's static metadata drives the processor, and
//! the document is wrapped in a cacheable JSON response.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, RawQuery},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use log::error;
use serde_json::json;
use tokio::sync::RwLock;

use crate::config::{ModuleSettings, ServerSettings};
use crate::jsonapi::{Document, JsonApiManager, RequestContext, RequestParameters};
use crate::route_table::RouteTable;

/// Cache context header value: responses vary by the full query string.
const CACHE_CONTEXT_QUERY_ARGS: &str = "url.query_args";

/// Serve one projected resource endpoint.
pub async fn serve_resource(
    Extension(manager): Extension<Arc<JsonApiManager>>,
    Extension(route_table): Extension<Arc<RwLock<RouteTable>>>,
    Extension(settings): Extension<Arc<RwLock<ModuleSettings>>>,
    Extension(server): Extension<Arc<ServerSettings>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let target = {
        let table = route_table.read().await;
        table.lookup(&path).cloned()
    };
    let Some(target) = target else {
        return not_found("No JSON:API resource is configured at this path");
    };

    // Route permission gate. Denial answers like a missing route so the
    // endpoint never confirms what exists.
    if !server
        .granted_permissions
        .iter()
        .any(|granted| granted == target.permission)
    {
        return not_found("No JSON:API resource is configured at this path");
    }

    let params = RequestParameters::parse(query.as_deref().unwrap_or(""));
    let ctx = RequestContext {
        base_url: request_base_url(&headers, &server),
    };
    let settings_snapshot = settings.read().await.clone();

    match manager
        .handle(
            &target.view_id,
            &target.display_id,
            &target.resource_id,
            &params,
            &ctx,
            &settings_snapshot,
        )
        .await
    {
        Ok((document, _trace)) => {
            let cache_tags = manager
                .cache_tags(&target.resource_id, &target.view_id)
                .await;
            cacheable_json(document, &cache_tags)
        }
        Err(err) if err.is_not_found() => not_found(&err.to_string()),
        Err(err) => {
            error!(
                "View execution failed for resource '{}': {err:#}",
                target.resource_id
            );
            internal_error()
        }
    }
}

/// Wrap the document with content type and cache metadata.
///
/// The content type is deliberately `application/json`, not the strict
/// JSON:API media type, so strict-conformance validation elsewhere never
/// engages.
fn cacheable_json(document: Document, cache_tags: &[String]) -> Response {
    let mut response = Json(document).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    if let Ok(value) = HeaderValue::from_str(&cache_tags.join(" ")) {
        headers.insert("x-cache-tags", value);
    }
    headers.insert(
        "x-cache-contexts",
        HeaderValue::from_static(CACHE_CONTEXT_QUERY_ARGS),
    );
    response
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "The request could not be processed" })),
    )
        .into_response()
}

/// Scheme and authority for link building, from the request when available.
fn request_base_url(headers: &HeaderMap, server: &ServerSettings) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|h| h.to_string())
        .unwrap_or_else(|| format!("{}:{}", server.host, server.port));
    format!("{scheme}://{host}")
}
