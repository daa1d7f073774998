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

//! The JSON:API-shaped response envelope.
//!
//! Not full JSON:API: no relationships, no includes, no sparse fieldsets.
//! The shape is `data` / `meta` / `links`, with links as `{href}` objects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Type name used for rows without a backing entity.
pub const VIEW_RESULT_TYPE: &str = "view-result";

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// Registered resource type name, or [`VIEW_RESULT_TYPE`].
    #[serde(rename = "type")]
    pub type_name: String,
    /// Entity UUID, or the row's zero-based ordinal for non-entity rows.
    pub id: String,
    /// Visible field machine name -> rendered value. Nulls render as "".
    pub attributes: IndexMap<String, String>,
}

/// The complete response document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub data: Vec<ResourceObject>,
    pub meta: DocumentMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Number of resource objects in `data`, after any row skips.
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewMeta>,
}

/// Identity of the executed view, included when enabled in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewMeta {
    pub id: String,
    pub display: String,
    pub title: String,
}

/// Pagination links. Present only when the display's pager is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub first: Link,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,
}

/// Links are objects with an `href`, never bare strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_members_are_omitted() {
        let document = Document {
            data: Vec::new(),
            meta: DocumentMeta {
                count: 0,
                view: None,
            },
            links: None,
        };

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value, json!({"data": [], "meta": {"count": 0}}));
    }

    #[test]
    fn resource_object_serializes_type_member() {
        let object = ResourceObject {
            type_name: "node--article".to_string(),
            id: "0".to_string(),
            attributes: IndexMap::from([("title".to_string(), "Hello".to_string())]),
        };

        let value = serde_json::to_value(&object).unwrap();
        assert_eq!(
            value,
            json!({"type": "node--article", "id": "0", "attributes": {"title": "Hello"}})
        );
    }

    #[test]
    fn links_serialize_as_href_objects() {
        let links = Links {
            self_link: Link {
                href: "http://localhost/jsonapi/views/articles?page[offset]=0&page[limit]=5"
                    .to_string(),
            },
            first: Link {
                href: "first".to_string(),
            },
            last: None,
            prev: None,
            next: Some(Link {
                href: "next".to_string(),
            }),
        };

        let value = serde_json::to_value(&links).unwrap();
        assert!(value.get("self").and_then(|l| l.get("href")).is_some());
        assert!(value.get("last").is_none());
        assert!(value.get("prev").is_none());
        assert_eq!(value["next"]["href"], json!("next"));
    }
}
