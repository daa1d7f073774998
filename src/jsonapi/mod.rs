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

//! The request processor.
//!
//! Given a view id, display id, resource id, and the parsed request
//! parameters, [`JsonApiManager::handle`] loads and executes the view with
//! request-derived overrides and produces the JSON:API-shaped document.
//!
//! Query-string conventions on public endpoints:
//! - `filter[<field>]=<value>` and `filter[<field>][<op>]=<value>`
//! - `page[offset]=<int>` and `page[limit]=<int>`
//! - `sort=<field>,-<field2>` (leading `-` for descending)
//!
//! Unmatched parameters are ignored by design: they come from untrusted
//! query strings and best-effort application is the contract. Every ignore
//! decision is still recorded on an [`OverrideTrace`] for diagnostics.

pub mod envelope;
pub mod manager;
pub mod params;

pub use envelope::{Document, DocumentMeta, Link, Links, ResourceObject, ViewMeta};
pub use manager::{JsonApiManager, OverrideTrace, RequestContext, RequestError};
pub use params::{FilterParam, RequestParameters, SortParam};
