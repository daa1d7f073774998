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

//! The view subsystem.
//!
//! A *view* is a named query definition: an ordered field list, a set of
//! filter and sort handlers (some of which are exposed for request-time
//! overrides), and a pager. Each view carries one or more *displays*, a named
//! execution mode with its own field/filter/sort/pager configuration.
//!
//! Views are defined in the server configuration and executed against a
//! [`DataProvider`], which supplies the raw rows. The [`ExecutableView`] is
//! the per-request execution context: it binds a display, accepts exposed
//! input and pager/sort overrides, and runs the query.

pub mod executable;
pub mod pager;
pub mod provider;
pub mod store;
pub mod types;

pub use executable::{ExecutableView, ResultRow};
pub use pager::Pager;
pub use provider::{DataProvider, Dataset, DatasetRow, EntityRef, StaticDataProvider};
pub use store::ViewStore;
pub use types::{
    AccessRule, DisplayDefinition, FieldDefinition, FilterDefinition, FilterOperator,
    PagerSettings, SortDefinition, SortDirection, ViewDefinition,
};
