// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! OData query options
//!
//! Builders for the query parameters a Redfish service may honour on a
//! `GET`: `$expand`, `$select`, `$filter`, `$skip` and `$top`. [`Query`]
//! groups them and appends them to a URI:
//!
//! ```rust
//! use redfish_runtime_core::query::ExpandQuery;
//! use redfish_runtime_core::query::FilterQuery;
//! use redfish_runtime_core::query::Query;
//! use redfish_runtime_core::ODataId;
//!
//! let query = Query::new()
//!     .filter(FilterQuery::eq("Status/Health", "OK"))
//!     .skip(20)
//!     .top(10);
//! assert_eq!(
//!     query.to_query_string(),
//!     "$filter=Status/Health eq 'OK'&$skip=20&$top=10"
//! );
//!
//! let uri = Query::new()
//!     .expand(ExpandQuery::current().levels(2))
//!     .apply(&ODataId::from("/redfish/v1/Systems"));
//! assert_eq!(uri.as_str(), "/redfish/v1/Systems?$expand=.($levels=2)");
//! ```
//!
//! Support for each option is advertised by the service in
//! `ProtocolFeaturesSupported` of the service root. Options the service
//! does not know are usually ignored, so callers should not rely on them
//! for correctness.
//!
//! References:
//! - DMTF Redfish Specification DSP0266, "Query parameters"
//! - OData Version 4.0 Part 2: URL Conventions

use crate::ODataId;

/// `$expand` option.
///
/// | Constructor | Expands | Query |
/// |---|---|---|
/// | [`ExpandQuery::all`] | every hyperlink | `$expand=*($levels=1)` |
/// | [`ExpandQuery::current`] | hyperlinks outside `Links` | `$expand=.($levels=1)` |
/// | [`ExpandQuery::links`] | hyperlinks inside `Links` | `$expand=~($levels=1)` |
/// | [`ExpandQuery::property`] | one navigation property | `$expand=Thermal($levels=1)` |
#[derive(Debug, Clone)]
pub struct ExpandQuery {
    expression: String,
    levels: Option<u32>,
}

impl Default for ExpandQuery {
    fn default() -> Self {
        Self::current()
    }
}

impl ExpandQuery {
    fn with_expression(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            levels: Some(1),
        }
    }

    /// Expand every hyperlink, payload annotations included.
    #[must_use]
    pub fn all() -> Self {
        Self::with_expression("*")
    }

    /// Expand hyperlinks that are not in a `Links` property.
    #[must_use]
    pub fn current() -> Self {
        Self::with_expression(".")
    }

    /// Expand hyperlinks of `Links` properties only.
    #[must_use]
    pub fn links() -> Self {
        Self::with_expression("~")
    }

    /// Expand one navigation property, e.g. `"Members"`.
    pub fn property(property: impl Into<String>) -> Self {
        Self::with_expression(property)
    }

    /// Expand several navigation properties.
    #[must_use]
    pub fn properties(properties: &[&str]) -> Self {
        Self::with_expression(properties.join(","))
    }

    /// Number of levels the expansion cascades to.
    #[must_use]
    pub const fn levels(mut self, levels: u32) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Leave `$levels` out and let the service pick its default.
    #[must_use]
    pub const fn service_levels(mut self) -> Self {
        self.levels = None;
        self
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        match self.levels {
            Some(levels) => format!("$expand={}($levels={})", self.expression, levels),
            None => format!("$expand={}", self.expression),
        }
    }
}

/// Literal on the right-hand side of a filter comparison.
#[derive(Debug, Clone)]
pub enum FilterLiteral {
    /// Quoted string; single quotes are doubled on output.
    String(String),
    /// Floating point number.
    Number(f64),
    /// Integer.
    Integer(i64),
    /// `true` or `false`.
    Boolean(bool),
}

impl FilterLiteral {
    fn to_odata_string(&self) -> String {
        match self {
            Self::String(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Number(n) => n.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Boolean(b) => b.to_string(),
        }
    }
}

/// Values usable as filter literals.
pub trait ToFilterLiteral {
    fn to_filter_literal(self) -> FilterLiteral;
}

impl ToFilterLiteral for &str {
    fn to_filter_literal(self) -> FilterLiteral {
        FilterLiteral::String(self.to_string())
    }
}

impl ToFilterLiteral for String {
    fn to_filter_literal(self) -> FilterLiteral {
        FilterLiteral::String(self)
    }
}

impl ToFilterLiteral for i32 {
    fn to_filter_literal(self) -> FilterLiteral {
        FilterLiteral::Integer(i64::from(self))
    }
}

impl ToFilterLiteral for i64 {
    fn to_filter_literal(self) -> FilterLiteral {
        FilterLiteral::Integer(self)
    }
}

impl ToFilterLiteral for u32 {
    fn to_filter_literal(self) -> FilterLiteral {
        FilterLiteral::Integer(i64::from(self))
    }
}

impl ToFilterLiteral for f64 {
    fn to_filter_literal(self) -> FilterLiteral {
        FilterLiteral::Number(self)
    }
}

impl ToFilterLiteral for bool {
    fn to_filter_literal(self) -> FilterLiteral {
        FilterLiteral::Boolean(self)
    }
}

#[derive(Debug, Clone)]
enum FilterExpr {
    Comparison {
        property: String,
        operator: &'static str,
        value: FilterLiteral,
    },
    And(Box<FilterExpr>, Box<FilterExpr>),
    Or(Box<FilterExpr>, Box<FilterExpr>),
    Not(Box<FilterExpr>),
    Group(Box<FilterExpr>),
}

impl FilterExpr {
    fn to_odata_string(&self) -> String {
        match self {
            Self::Comparison {
                property,
                operator,
                value,
            } => format!("{} {} {}", property, operator, value.to_odata_string()),
            Self::And(left, right) => {
                format!("{} and {}", left.to_odata_string(), right.to_odata_string())
            }
            Self::Or(left, right) => {
                format!("{} or {}", left.to_odata_string(), right.to_odata_string())
            }
            Self::Not(expr) => format!("not {}", expr.to_odata_string()),
            Self::Group(expr) => format!("({})", expr.to_odata_string()),
        }
    }
}

/// `$filter` option.
///
/// Property paths use `/` between segments (`"Status/Health"`).
/// Expressions are combined left to right; use [`FilterQuery::group`] for
/// explicit precedence.
///
/// ```rust
/// use redfish_runtime_core::query::FilterQuery;
///
/// let filter = FilterQuery::eq("Status/State", "Enabled")
///     .and(FilterQuery::eq("Status/Health", "OK"))
///     .group()
///     .or(FilterQuery::eq("SystemType", "Physical"));
/// assert_eq!(
///     filter.to_query_string(),
///     "$filter=(Status/State eq 'Enabled' and Status/Health eq 'OK') or SystemType eq 'Physical'"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FilterQuery {
    expr: FilterExpr,
}

impl FilterQuery {
    fn comparison(
        property: impl Into<String>,
        operator: &'static str,
        value: impl ToFilterLiteral,
    ) -> Self {
        Self {
            expr: FilterExpr::Comparison {
                property: property.into(),
                operator,
                value: value.to_filter_literal(),
            },
        }
    }

    /// `property eq value`
    pub fn eq(property: impl Into<String>, value: impl ToFilterLiteral) -> Self {
        Self::comparison(property, "eq", value)
    }

    /// `property ne value`
    pub fn ne(property: impl Into<String>, value: impl ToFilterLiteral) -> Self {
        Self::comparison(property, "ne", value)
    }

    /// `property gt value`
    pub fn gt(property: impl Into<String>, value: impl ToFilterLiteral) -> Self {
        Self::comparison(property, "gt", value)
    }

    /// `property ge value`
    pub fn ge(property: impl Into<String>, value: impl ToFilterLiteral) -> Self {
        Self::comparison(property, "ge", value)
    }

    /// `property lt value`
    pub fn lt(property: impl Into<String>, value: impl ToFilterLiteral) -> Self {
        Self::comparison(property, "lt", value)
    }

    /// `property le value`
    pub fn le(property: impl Into<String>, value: impl ToFilterLiteral) -> Self {
        Self::comparison(property, "le", value)
    }

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self {
            expr: FilterExpr::And(Box::new(self.expr), Box::new(other.expr)),
        }
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            expr: FilterExpr::Or(Box::new(self.expr), Box::new(other.expr)),
        }
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self {
            expr: FilterExpr::Not(Box::new(self.expr)),
        }
    }

    /// Wrap the expression built so far in parentheses.
    #[must_use]
    pub fn group(self) -> Self {
        Self {
            expr: FilterExpr::Group(Box::new(self.expr)),
        }
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        format!("$filter={}", self.expr.to_odata_string())
    }
}

/// Set of query options sent with one `GET`.
#[derive(Debug, Clone, Default)]
pub struct Query {
    expand: Option<ExpandQuery>,
    select: Vec<String>,
    filter: Option<FilterQuery>,
    skip: Option<usize>,
    top: Option<usize>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn expand(mut self, expand: ExpandQuery) -> Self {
        self.expand = Some(expand);
        self
    }

    /// Add properties to `$select`. Nested properties use `/`.
    #[must_use]
    pub fn select(mut self, properties: &[&str]) -> Self {
        self.select
            .extend(properties.iter().map(|p| (*p).to_string()));
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: FilterQuery) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Skip the first `n` collection members.
    #[must_use]
    pub const fn skip(mut self, n: usize) -> Self {
        self.skip = Some(n);
        self
    }

    /// Return at most `n` collection members per page.
    #[must_use]
    pub const fn top(mut self, n: usize) -> Self {
        self.top = Some(n);
        self
    }

    /// True when no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expand.is_none()
            && self.select.is_empty()
            && self.filter.is_none()
            && self.skip.is_none()
            && self.top.is_none()
    }

    /// Options joined with `&`, in the order expand, select, filter, skip,
    /// top. Empty when no option is set.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(expand) = &self.expand {
            parts.push(expand.to_query_string());
        }
        if !self.select.is_empty() {
            parts.push(format!("$select={}", self.select.join(",")));
        }
        if let Some(filter) = &self.filter {
            parts.push(filter.to_query_string());
        }
        if let Some(skip) = self.skip {
            parts.push(format!("$skip={}", skip));
        }
        if let Some(top) = self.top {
            parts.push(format!("$top={}", top));
        }
        parts.join("&")
    }

    /// `uri` with the options appended. A query string already present in
    /// `uri` is extended, never parsed. Empty URIs stay empty.
    #[must_use]
    pub fn apply(&self, uri: &ODataId) -> ODataId {
        if self.is_empty() || uri.is_empty() {
            return uri.clone();
        }
        let separator = if uri.as_str().contains('?') { '&' } else { '?' };
        format!("{}{}{}", uri, separator, self.to_query_string()).into()
    }
}
