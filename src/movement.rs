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

//! Stock movement records.
//!
//! Inflows increase the balance of a product, outflows decrease it. Both are
//! append-only: once recorded, a movement is never updated or deleted, and
//! the balance is always derived by replaying the full history.

use crate::base::{FactoryCode, MovementId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded stock inflow ("entrada").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inflow {
    pub id: MovementId,
    pub factory_code: FactoryCode,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub invoice_ref: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// A recorded stock outflow ("saída").
///
/// Carries a snapshot of the product description so history rows stay
/// readable on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outflow {
    pub id: MovementId,
    pub factory_code: FactoryCode,
    pub description: Option<String>,
    pub quantity: u32,
    pub truck_plate: String,
    pub recipient: String,
    pub recorded_at: DateTime<Utc>,
}

/// An inflow submission. Id and timestamp are assigned by the ledger.
#[derive(Debug, Clone)]
pub struct NewInflow {
    pub factory_code: FactoryCode,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub invoice_ref: Option<String>,
}

/// An outflow submission. Id and timestamp are assigned by the ledger; a
/// missing description is snapshotted from the registered product.
#[derive(Debug, Clone)]
pub struct NewOutflow {
    pub factory_code: FactoryCode,
    pub description: Option<String>,
    pub quantity: u32,
    pub truck_plate: String,
    pub recipient: String,
}

impl NewOutflow {
    /// Truck plates are uppercased at write time, like the product codes.
    pub fn normalized(mut self) -> Self {
        self.truck_plate = self.truck_plate.trim().to_uppercase();
        self
    }
}
