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

//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use views_jsonapi_server::config::{ResourceDefinition, ServerConfig};
use views_jsonapi_server::resource_types::ResourceType;
use views_jsonapi_server::views::{
    AccessRule, Dataset, DatasetRow, DisplayDefinition, EntityRef, FieldDefinition,
    FilterDefinition, FilterOperator, PagerSettings, SortDefinition, SortDirection, ViewDefinition,
};
use views_jsonapi_server::ViewsJsonApiServer;

/// Fixed UUID for the registered entity row, so assertions are stable.
pub const ARTICLE_UUID: &str = "6f2a1c9e-3b1d-4a53-9a49-1f9e1a0a2b3c";

pub fn plain_row(values: Value) -> DatasetRow {
    DatasetRow {
        entity: None,
        values: values.as_object().cloned().unwrap_or_default(),
    }
}

pub fn entity_row(uuid: &str, bundle: &str, values: Value) -> DatasetRow {
    DatasetRow {
        entity: Some(EntityRef {
            entity_type: "node".to_string(),
            bundle: bundle.to_string(),
            uuid: Uuid::parse_str(uuid).expect("valid uuid literal"),
        }),
        values: values.as_object().cloned().unwrap_or_default(),
    }
}

pub fn field(id: &str) -> FieldDefinition {
    FieldDefinition {
        id: id.to_string(),
        label: None,
        column: None,
        exclude: false,
    }
}

pub fn exposed_filter(column: &str) -> FilterDefinition {
    FilterDefinition {
        id: format!("{column}_filter"),
        column: column.to_string(),
        operator: FilterOperator::Equals,
        value: None,
        exposed: true,
        identifier: None,
    }
}

pub fn exposed_sort(column: &str) -> SortDefinition {
    SortDefinition {
        id: format!("{column}_sort"),
        column: column.to_string(),
        direction: SortDirection::Asc,
        exposed: true,
    }
}

pub fn resource(id: &str, view_id: &str, display_id: &str, path: &str) -> ResourceDefinition {
    ResourceDefinition {
        id: id.to_string(),
        label: id.to_string(),
        view_id: view_id.to_string(),
        display_id: display_id.to_string(),
        path: path.to_string(),
        description: None,
    }
}

fn display(id: &str, access: AccessRule, pager: PagerSettings) -> DisplayDefinition {
    DisplayDefinition {
        id: id.to_string(),
        title: Some(format!("{id} display")),
        fields: vec![field("title")],
        filters: vec![exposed_filter("status")],
        sorts: vec![exposed_sort("created")],
        pager,
        access,
    }
}

/// The standard fixture: three views over three datasets, five resources.
pub fn fixture_config() -> ServerConfig {
    let content_rows = vec![
        plain_row(json!({"title": "First", "status": 1, "created": 30})),
        plain_row(json!({"title": "Second", "status": 0, "created": 10})),
        plain_row(json!({"title": "Third", "status": 1, "created": 20})),
    ];

    let number_rows = (0..23)
        .map(|i| plain_row(json!({"title": format!("row{i}"), "status": 1, "created": i})))
        .collect();

    let entity_rows = vec![
        entity_row(ARTICLE_UUID, "article", json!({"title": "Registered"})),
        entity_row(
            "0b9a5c72-88f1-4d29-b1e7-aa31c4f7d001",
            "unregistered",
            json!({"title": "Dropped"}),
        ),
        plain_row(json!({"title": "Plain"})),
    ];

    let content_listing = ViewDefinition {
        id: "content_listing".to_string(),
        label: "Content listing".to_string(),
        provider: "content".to_string(),
        tags: vec!["content".to_string()],
        displays: vec![
            display("default", AccessRule::Allow, PagerSettings::default()),
            display("denied", AccessRule::Deny, PagerSettings::default()),
            display(
                "restricted",
                AccessRule::Permission("administer views".to_string()),
                PagerSettings::default(),
            ),
        ],
    };

    let numbers_listing = ViewDefinition {
        id: "numbers_listing".to_string(),
        label: "Numbers".to_string(),
        provider: "numbers".to_string(),
        tags: Vec::new(),
        displays: vec![display(
            "paged",
            AccessRule::Allow,
            PagerSettings {
                enabled: true,
                items_per_page: 5,
                offset: 0,
            },
        )],
    };

    let entity_listing = ViewDefinition {
        id: "entity_listing".to_string(),
        label: "Entities".to_string(),
        provider: "entities".to_string(),
        tags: Vec::new(),
        displays: vec![display("default", AccessRule::Allow, PagerSettings::default())],
    };

    ServerConfig {
        resources: vec![
            resource("articles", "content_listing", "default", "views/articles"),
            resource("numbers", "numbers_listing", "paged", "views/numbers"),
            resource("entities", "entity_listing", "default", "views/entities"),
            resource("denied", "content_listing", "denied", "views/denied"),
            resource(
                "restricted",
                "content_listing",
                "restricted",
                "views/restricted",
            ),
        ],
        views: vec![content_listing, numbers_listing, entity_listing],
        datasets: vec![
            Dataset {
                id: "content".to_string(),
                rows: content_rows,
            },
            Dataset {
                id: "numbers".to_string(),
                rows: number_rows,
            },
            Dataset {
                id: "entities".to_string(),
                rows: entity_rows,
            },
        ],
        resource_types: vec![ResourceType {
            entity_type: "node".to_string(),
            bundle: "article".to_string(),
            type_name: "node--article".to_string(),
        }],
        ..Default::default()
    }
}

pub fn fixture_router() -> Router {
    ViewsJsonApiServer::from_config(fixture_config()).router()
}

/// GET a path and decode the JSON body.
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("host", "localhost:8080")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, value)
}

/// Send a JSON body with the given method.
pub async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("host", "localhost:8080")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, value)
}
