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

//! Core identifier types for products and stock movements.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Manufacturer-assigned unique product identifier; the primary key of the
/// product table.
///
/// Factory codes are case-normalized to uppercase and trimmed at
/// construction, so `"x-500"` and `"X-500"` name the same product no matter
/// which door they came in through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FactoryCode(String);

impl FactoryCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Manual impl so codes arriving over the wire are normalized too.
impl<'de> Deserialize<'de> for FactoryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(FactoryCode::new(raw))
    }
}

/// Unique identifier for a recorded stock movement.
///
/// Wraps a `u64` assigned monotonically per movement table, mirroring an
/// autoincrement row id. Ids are never reused, so a rejected movement may
/// leave a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MovementId(pub u64);

impl fmt::Display for MovementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_code_is_uppercased() {
        assert_eq!(FactoryCode::new("x-500").as_str(), "X-500");
        assert_eq!(FactoryCode::new("X-500").as_str(), "X-500");
    }

    #[test]
    fn factory_code_is_trimmed() {
        assert_eq!(FactoryCode::new("  abc-1 ").as_str(), "ABC-1");
    }

    #[test]
    fn normalized_codes_compare_equal() {
        assert_eq!(FactoryCode::new("x-500"), FactoryCode::new(" X-500 "));
    }

    #[test]
    fn deserialization_normalizes() {
        let code: FactoryCode = serde_json::from_str("\"x-500\"").unwrap();
        assert_eq!(code, FactoryCode::new("X-500"));
    }
}
