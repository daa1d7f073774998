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

//! Admin API integration tests.
//!
//! Covers resource CRUD with live route regeneration, settings round-trips,
//! and persistence back to the config file.

#![allow(clippy::unwrap_used)]

mod test_support;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_support::{fixture_config, fixture_router, get_json, send_json};
use views_jsonapi_server::{save_config_file, ViewsJsonApiServer};

#[tokio::test]
async fn health_check_reports_ok() {
    let router = fixture_router();
    let (status, body) = get_json(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn list_resources_includes_hypermedia_links() {
    let router = fixture_router();
    let (status, body) = get_json(&router, "/api/v1/resources").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 5);

    let articles = items.iter().find(|i| i["id"] == "articles").unwrap();
    assert_eq!(articles["links"]["self"], "/api/v1/resources/articles");
    assert_eq!(articles["links"]["endpoint"], "/jsonapi/views/articles");
}

#[tokio::test]
async fn get_resource_404_for_unknown_id() {
    let router = fixture_router();
    let (status, body) = get_json(&router, "/api/v1/resources/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn created_resource_is_served_without_restart() {
    let router = fixture_router();

    // The path is dark before the resource exists.
    let (status, _) = get_json(&router, "/jsonapi/views/latest").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/v1/resources",
        json!({
            "id": "latest",
            "label": "Latest content",
            "viewId": "content_listing",
            "displayId": "default",
            "path": "views/latest",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = get_json(&router, "/jsonapi/views/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], json!(3));
}

#[tokio::test]
async fn deleted_resource_endpoint_disappears() {
    let router = fixture_router();

    let (status, _) = get_json(&router, "/jsonapi/views/articles").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &router,
        "DELETE",
        "/api/v1/resources/articles",
        json!(null),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_json(&router, "/jsonapi/views/articles").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn updated_resource_moves_to_its_new_path() {
    let router = fixture_router();

    let (status, _) = send_json(
        &router,
        "PUT",
        "/api/v1/resources/articles",
        json!({
            "id": "articles",
            "label": "Articles",
            "viewId": "content_listing",
            "displayId": "default",
            "path": "views/published",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_json(&router, "/jsonapi/views/articles").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get_json(&router, "/jsonapi/views/published").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_path_is_rejected_with_conflict() {
    let router = fixture_router();

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/v1/resources",
        json!({
            "id": "another",
            "label": "Another",
            "viewId": "content_listing",
            "displayId": "default",
            "path": "views/articles",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_RESOURCE");
}

#[tokio::test]
async fn duplicate_id_is_rejected_with_conflict() {
    let router = fixture_router();

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/v1/resources",
        json!({
            "id": "articles",
            "label": "Articles again",
            "viewId": "content_listing",
            "displayId": "default",
            "path": "views/articles_again",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_RESOURCE");
}

#[tokio::test]
async fn invalid_machine_name_is_rejected() {
    let router = fixture_router();

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/v1/resources",
        json!({
            "id": "Not A Machine Name",
            "label": "Nope",
            "viewId": "content_listing",
            "displayId": "default",
            "path": "views/nope",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn resource_id_is_immutable_on_update() {
    let router = fixture_router();

    let (status, body) = send_json(
        &router,
        "PUT",
        "/api/v1/resources/articles",
        json!({
            "id": "renamed",
            "label": "Renamed",
            "viewId": "content_listing",
            "displayId": "default",
            "path": "views/renamed",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn settings_update_takes_effect_on_next_request() {
    let router = fixture_router();

    let (_, body) = get_json(&router, "/jsonapi/views/articles").await;
    assert!(body["meta"].get("view").is_some());

    let (status, _) = send_json(
        &router,
        "PUT",
        "/api/v1/settings",
        json!({
            "includeViewMetadata": false,
            "preserveFieldNames": false,
            "cacheEnabled": true,
            "cacheMaxAge": 3600,
            "filterMapping": false,
            "includeEntityLinks": true,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_json(&router, "/jsonapi/views/articles").await;
    assert!(body["meta"].get("view").is_none());
}

#[tokio::test]
async fn settings_round_trip_preserves_schema() {
    let router = fixture_router();
    let (status, body) = get_json(&router, "/api/v1/settings").await;

    assert_eq!(status, StatusCode::OK);
    let settings = &body["data"];
    assert_eq!(settings["includeViewMetadata"], true);
    assert_eq!(settings["preserveFieldNames"], false);
    assert_eq!(settings["cacheEnabled"], true);
    assert_eq!(settings["cacheMaxAge"], 3600);
    assert_eq!(settings["filterMapping"], false);
    assert_eq!(settings["includeEntityLinks"], true);
}

#[tokio::test]
async fn view_inventory_lists_displays() {
    let router = fixture_router();
    let (status, body) = get_json(&router, "/api/v1/views").await;

    assert_eq!(status, StatusCode::OK);
    let views = body["data"].as_array().unwrap();
    let content = views.iter().find(|v| v["id"] == "content_listing").unwrap();
    let display_ids: Vec<&str> = content["displays"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(display_ids, ["default", "denied", "restricted"]);
}

#[tokio::test]
async fn mutations_persist_to_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("server.yaml");
    save_config_file(&fixture_config(), &config_path).unwrap();

    let server = ViewsJsonApiServer::new(config_path.clone(), None).unwrap();
    let router = server.router();

    let (status, _) = send_json(
        &router,
        "POST",
        "/api/v1/resources",
        json!({
            "id": "persisted",
            "label": "Persisted",
            "viewId": "content_listing",
            "displayId": "default",
            "path": "views/persisted",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let saved = std::fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("persisted"));

    // A fresh server picks the new resource up from the file.
    let reloaded = ViewsJsonApiServer::new(config_path, None).unwrap();
    let router = reloaded.router();
    let (status, _) = get_json(&router, "/jsonapi/views/persisted").await;
    assert_eq!(status, StatusCode::OK);
}
