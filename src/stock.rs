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

//! Per-product stock records.
//!
//! A [`StockRecord`] holds one product row and its full movement history
//! behind a single mutex. Holding that mutex across the balance check and
//! the insert is what makes the outflow admission atomic: two concurrent
//! outflows against the same product can never both pass validation against
//! a stale balance.
//!
//! # Example
//!
//! ```
//! use stock_ledger_rs::{FactoryCode, Product, StockRecord};
//!
//! let product = Product::new(FactoryCode::new("X-500"), None, "Brake pad".into(), None, None);
//! let record = StockRecord::new(product);
//! assert_eq!(record.balance(), 0);
//! ```

use crate::base::FactoryCode;
use crate::movement::{Inflow, Outflow};
use crate::product::Product;
use crate::StockError;
use parking_lot::Mutex;

#[derive(Debug)]
struct StockData {
    product: Product,
    inflows: Vec<Inflow>,
    outflows: Vec<Outflow>,
}

impl StockData {
    fn new(product: Product) -> Self {
        Self {
            product,
            inflows: Vec::new(),
            outflows: Vec::new(),
        }
    }

    /// Derives the balance by replaying the full movement history.
    ///
    /// Deliberately O(n) in movement count: the balance is never cached, so
    /// there is no cache to fall out of sync with the rows.
    fn balance(&self) -> i64 {
        let inflows: i64 = self.inflows.iter().map(|m| i64::from(m.quantity)).sum();
        let outflows: i64 = self.outflows.iter().map(|m| i64::from(m.quantity)).sum();
        inflows - outflows
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance() >= 0,
            "Invariant violated: stock balance went negative: {}",
            self.balance()
        );
    }

    fn push_inflow(&mut self, inflow: Inflow) -> Result<(), StockError> {
        if inflow.quantity == 0 {
            return Err(StockError::InvalidQuantity);
        }
        self.inflows.push(inflow);
        self.assert_invariants();
        Ok(())
    }

    /// Admission check and insert, both under the caller-held lock.
    fn push_outflow(&mut self, outflow: Outflow) -> Result<(), StockError> {
        if outflow.quantity == 0 {
            return Err(StockError::InvalidQuantity);
        }
        if i64::from(outflow.quantity) > self.balance() {
            return Err(StockError::InsufficientBalance);
        }
        self.outflows.push(outflow);
        self.assert_invariants();
        Ok(())
    }
}

/// One product and its append-only movement history.
#[derive(Debug)]
pub struct StockRecord {
    inner: Mutex<StockData>,
}

impl StockRecord {
    pub fn new(product: Product) -> Self {
        Self {
            inner: Mutex::new(StockData::new(product)),
        }
    }

    pub fn factory_code(&self) -> FactoryCode {
        self.inner.lock().product.factory_code.clone()
    }

    /// Snapshot of the product row.
    pub fn product(&self) -> Product {
        self.inner.lock().product.clone()
    }

    /// Current balance: Σ inflow quantities − Σ outflow quantities.
    pub fn balance(&self) -> i64 {
        self.inner.lock().balance()
    }

    /// Appends an inflow row.
    ///
    /// # Errors
    ///
    /// [`StockError::InvalidQuantity`] when the quantity is zero.
    pub fn record_inflow(&self, inflow: Inflow) -> Result<(), StockError> {
        self.inner.lock().push_inflow(inflow)
    }

    /// Checks and appends an outflow row in one critical section, returning
    /// the row as stored.
    ///
    /// A missing description is snapshotted from the product so history rows
    /// stay self-describing. A rejected outflow leaves the record untouched.
    ///
    /// # Errors
    ///
    /// - [`StockError::InvalidQuantity`] when the quantity is zero.
    /// - [`StockError::InsufficientBalance`] when the quantity exceeds the
    ///   balance at the moment of the check.
    pub fn record_outflow(&self, mut outflow: Outflow) -> Result<Outflow, StockError> {
        let mut data = self.inner.lock();
        if outflow.description.is_none() {
            outflow.description = Some(data.product.description.clone());
        }
        data.push_outflow(outflow.clone())?;
        Ok(outflow)
    }

    /// Snapshot of all inflow rows in insertion order.
    pub fn inflows(&self) -> Vec<Inflow> {
        self.inner.lock().inflows.clone()
    }

    /// Snapshot of all outflow rows in insertion order.
    pub fn outflows(&self) -> Vec<Outflow> {
        self.inner.lock().outflows.clone()
    }
}
