// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Product catalog entries and lookup criteria.

use crate::base::FactoryCode;
use serde::{Deserialize, Serialize};

/// A registered product.
///
/// Products are immutable once created; there is no update or delete path.
/// The factory code is the primary key. The supplier code is an alternate
/// identifier whose uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub factory_code: FactoryCode,
    pub supplier_code: Option<String>,
    pub description: String,
    pub supplier_name: Option<String>,
    pub unit_of_measure: Option<String>,
}

impl Product {
    /// Builds a product, normalizing the supplier code to uppercase the same
    /// way the factory code is normalized at construction.
    pub fn new(
        factory_code: FactoryCode,
        supplier_code: Option<String>,
        description: String,
        supplier_name: Option<String>,
        unit_of_measure: Option<String>,
    ) -> Self {
        Self {
            factory_code,
            supplier_code: supplier_code.map(|c| c.trim().to_uppercase()),
            description,
            supplier_name,
            unit_of_measure,
        }
    }
}

/// Lookup criteria for the single-result product search.
///
/// Exactly one criterion is honored per call. When several are supplied the
/// precedence is factory code, then supplier code, then description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub factory_code: Option<String>,
    pub supplier_code: Option<String>,
    pub description: Option<String>,
}

impl ProductQuery {
    pub fn by_factory_code(code: impl Into<String>) -> Self {
        Self {
            factory_code: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn by_supplier_code(code: impl Into<String>) -> Self {
        Self {
            supplier_code: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn by_description(fragment: impl Into<String>) -> Self {
        Self {
            description: Some(fragment.into()),
            ..Self::default()
        }
    }

    /// The single criterion this query resolves to, after precedence.
    ///
    /// Blank criteria are treated as absent, matching the falsy checks the
    /// search form performs before submitting.
    pub fn criterion(&self) -> Option<Criterion> {
        fn non_blank(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(code) = non_blank(&self.factory_code) {
            return Some(Criterion::FactoryCode(FactoryCode::new(code)));
        }
        if let Some(code) = non_blank(&self.supplier_code) {
            return Some(Criterion::SupplierCode(code.to_uppercase()));
        }
        if let Some(fragment) = non_blank(&self.description) {
            return Some(Criterion::Description(fragment.to_lowercase()));
        }
        None
    }
}

/// A resolved search criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Exact match on the primary key.
    FactoryCode(FactoryCode),
    /// Exact match on the uppercased supplier code.
    SupplierCode(String),
    /// Case-insensitive substring match; the fragment is pre-lowercased.
    Description(String),
}

impl Criterion {
    /// Whether the given product satisfies this criterion.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Criterion::FactoryCode(code) => product.factory_code == *code,
            Criterion::SupplierCode(code) => product.supplier_code.as_deref() == Some(code),
            Criterion::Description(fragment) => {
                product.description.to_lowercase().contains(fragment)
            }
        }
    }
}
