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

//! Query-string parameter parsing.
//!
//! Bracketed parameter names (`filter[status]`, `page[offset]`) cannot be
//! expressed through `axum::extract::Query`, so the raw query string is
//! decoded here. Parsing is best-effort: anything that does not match a
//! known shape is dropped without error.

use lazy_static::lazy_static;
use regex::Regex;
use url::form_urlencoded;

use crate::views::SortDirection;

lazy_static! {
    /// `filter[field]` and `filter[field][operator]`.
    static ref FILTER_PATTERN: Regex =
        Regex::new(r"^filter\[([^\]]+)\](?:\[([^\]]+)\])?$").expect("Invalid regex pattern");
}

/// One `filter[...]` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParam {
    /// Field name from the first bracket segment.
    pub field: String,
    /// Operator from the second bracket segment, when present. Parsed but
    /// not applied; the display's configured operator governs matching.
    pub operator: Option<String>,
    pub value: String,
}

/// One token of the `sort` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortParam {
    pub field: String,
    pub direction: SortDirection,
}

/// Request-derived overrides, decoded from the raw query string.
///
/// Overrides are matched by parameter name, so their effect is independent
/// of query-string order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
    pub filters: Vec<FilterParam>,
    pub page_offset: Option<u32>,
    pub page_limit: Option<u32>,
    pub sorts: Vec<SortParam>,
}

impl RequestParameters {
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();

        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            if let Some(caps) = FILTER_PATTERN.captures(&name) {
                let field = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                if field.is_empty() {
                    continue;
                }
                params.filters.push(FilterParam {
                    field: field.to_string(),
                    operator: caps.get(2).map(|m| m.as_str().to_string()),
                    value: value.to_string(),
                });
            } else if name == "page[offset]" {
                params.page_offset = Some(coerce_int(&value));
            } else if name == "page[limit]" {
                params.page_limit = Some(coerce_int(&value));
            } else if name == "sort" {
                for token in value.split(',') {
                    let token = token.trim();
                    let (field, direction) = match token.strip_prefix('-') {
                        Some(rest) => (rest, SortDirection::Desc),
                        None => (token, SortDirection::Asc),
                    };
                    if field.is_empty() {
                        continue;
                    }
                    params.sorts.push(SortParam {
                        field: field.to_string(),
                        direction,
                    });
                }
            }
            // Everything else is not ours; leave it alone.
        }

        params
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
            && self.page_offset.is_none()
            && self.page_limit.is_none()
            && self.sorts.is_empty()
    }
}

/// Integer coercion for pager values: garbage becomes 0, negatives clamp.
fn coerce_int(value: &str) -> u32 {
    value
        .trim()
        .parse::<i64>()
        .unwrap_or(0)
        .clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_simple_filter() {
        let params = RequestParameters::parse("filter[status]=1");
        assert_eq!(
            params.filters,
            vec![FilterParam {
                field: "status".to_string(),
                operator: None,
                value: "1".to_string(),
            }]
        );
    }

    #[test]
    fn parses_filter_with_operator_segment() {
        let params = RequestParameters::parse("filter[created][%3E]=100");
        assert_eq!(params.filters.len(), 1);
        assert_eq!(params.filters[0].field, "created");
        assert_eq!(params.filters[0].operator.as_deref(), Some(">"));
        assert_eq!(params.filters[0].value, "100");
    }

    #[test]
    fn parses_url_encoded_bracket_names() {
        // Clients commonly percent-encode the brackets themselves.
        let params = RequestParameters::parse("filter%5Bstatus%5D=1&page%5Blimit%5D=5");
        assert_eq!(params.filters.len(), 1);
        assert_eq!(params.filters[0].field, "status");
        assert_eq!(params.page_limit, Some(5));
    }

    #[test]
    fn parses_page_offset_and_limit() {
        let params = RequestParameters::parse("page[offset]=10&page[limit]=5");
        assert_eq!(params.page_offset, Some(10));
        assert_eq!(params.page_limit, Some(5));
    }

    #[test]
    fn page_values_coerce_like_integers() {
        let params = RequestParameters::parse("page[offset]=abc&page[limit]=-3");
        assert_eq!(params.page_offset, Some(0));
        assert_eq!(params.page_limit, Some(0));
    }

    #[test]
    fn parses_sort_tokens_with_directions() {
        let params = RequestParameters::parse("sort=created,-title");
        assert_eq!(
            params.sorts,
            vec![
                SortParam {
                    field: "created".to_string(),
                    direction: SortDirection::Asc,
                },
                SortParam {
                    field: "title".to_string(),
                    direction: SortDirection::Desc,
                },
            ]
        );
    }

    #[test]
    fn empty_sort_tokens_are_dropped() {
        let params = RequestParameters::parse("sort=,-,created");
        assert_eq!(params.sorts.len(), 1);
        assert_eq!(params.sorts[0].field, "created");
    }

    #[test]
    fn unrelated_parameters_are_ignored() {
        let params = RequestParameters::parse("foo=bar&page=3&filterx=1");
        assert!(params.is_empty());
    }

    #[test]
    fn parameter_order_does_not_matter() {
        let a = RequestParameters::parse("sort=created&filter[status]=1&page[limit]=5");
        let b = RequestParameters::parse("page[limit]=5&sort=created&filter[status]=1");
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_filters_are_kept_in_order() {
        let params = RequestParameters::parse("filter[status]=1&filter[status]=0");
        assert_eq!(params.filters.len(), 2);
        assert_eq!(params.filters[1].value, "0");
    }
}
