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

//! Row-windowing state for an executable view.

use super::types::PagerSettings;

/// Per-request pager state.
///
/// `total_items` is 0 until execution has run; a disabled pager never windows
/// rows and suppresses pagination links entirely.
#[derive(Debug, Clone)]
pub struct Pager {
    enabled: bool,
    items_per_page: u32,
    offset: u32,
    total_items: u32,
}

impl Pager {
    pub fn from_settings(settings: &PagerSettings) -> Self {
        Self {
            enabled: settings.enabled,
            items_per_page: settings.items_per_page,
            offset: settings.offset,
            total_items: 0,
        }
    }

    /// Whether this display windows its rows at all.
    pub fn use_pager(&self) -> bool {
        self.enabled
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    pub fn set_items_per_page(&mut self, items_per_page: u32) {
        self.items_per_page = items_per_page;
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: u32) {
        self.offset = offset;
    }

    /// Zero-based page the current offset falls on.
    pub fn current_page(&self) -> u32 {
        if self.items_per_page == 0 {
            0
        } else {
            self.offset / self.items_per_page
        }
    }

    /// Total matched rows before windowing. 0 until execution.
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    pub fn set_total_items(&mut self, total_items: u32) {
        self.total_items = total_items;
    }

    /// Page count, 0 when the total is unknown.
    pub fn total_pages(&self) -> u32 {
        if self.total_items == 0 || self.items_per_page == 0 {
            0
        } else {
            self.total_items.div_ceil(self.items_per_page)
        }
    }
}
