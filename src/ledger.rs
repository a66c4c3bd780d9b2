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

//! The inventory ledger store.
//!
//! The [`Ledger`] is the explicitly constructed store handle that every
//! operation goes through: product registration and lookup, movement
//! recording, balance derivation, and the outflow history.
//!
//! # Concurrency
//!
//! Products live in a [`DashMap`] keyed by factory code, so operations on
//! different products run in parallel. Operations on one product serialize
//! on that product's [`StockRecord`] mutex, which is what keeps the outflow
//! admission check race-free.

use crate::base::{FactoryCode, MovementId};
use crate::movement::{Inflow, NewInflow, NewOutflow, Outflow};
use crate::product::{Criterion, Product};
use crate::stock::StockRecord;
use crate::StockError;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Inventory store holding the product table and both movement tables.
///
/// # Invariants
///
/// - Factory codes are unique across all registered products.
/// - Movement rows always reference a registered product.
/// - A committed outflow never drives a product's balance negative.
#[derive(Debug)]
pub struct Ledger {
    /// Stock records indexed by factory code.
    products: DashMap<FactoryCode, StockRecord>,
    /// Next inflow row id, mirroring an autoincrement column.
    next_inflow_id: AtomicU64,
    /// Next outflow row id.
    next_outflow_id: AtomicU64,
}

impl Ledger {
    /// Creates an empty ledger with no products or movements.
    pub fn new() -> Self {
        Ledger {
            products: DashMap::new(),
            next_inflow_id: AtomicU64::new(1),
            next_outflow_id: AtomicU64::new(1),
        }
    }

    /// Registers a product under its factory code.
    ///
    /// Uses the entry API for an atomic check-and-insert, so two concurrent
    /// registrations of the same code cannot both succeed.
    ///
    /// # Errors
    ///
    /// [`StockError::DuplicateProduct`] when the factory code is already
    /// registered; the existing row is left untouched.
    pub fn register_product(&self, product: Product) -> Result<(), StockError> {
        match self.products.entry(product.factory_code.clone()) {
            Entry::Occupied(_) => Err(StockError::DuplicateProduct),
            Entry::Vacant(entry) => {
                entry.insert(StockRecord::new(product));
                Ok(())
            }
        }
    }

    /// Single-result product lookup.
    ///
    /// Factory-code criteria hit the index directly; supplier-code and
    /// description criteria scan the table. When a description fragment
    /// matches several products the first match wins — iteration order is
    /// unspecified, an accepted ambiguity of this lookup.
    pub fn find_product(&self, criterion: &Criterion) -> Option<Product> {
        if let Criterion::FactoryCode(code) = criterion {
            return self.products.get(code).map(|record| record.product());
        }

        self.products.iter().find_map(|record| {
            let product = record.value().product();
            criterion.matches(&product).then_some(product)
        })
    }

    /// Records a stock inflow against a registered product.
    ///
    /// The row id and registration timestamp are assigned here, never by the
    /// caller.
    ///
    /// # Errors
    ///
    /// - [`StockError::ProductNotFound`] when the factory code has no
    ///   registered product.
    /// - [`StockError::InvalidQuantity`] when the quantity is zero.
    pub fn record_inflow(&self, submission: NewInflow) -> Result<Inflow, StockError> {
        let record = self
            .products
            .get(&submission.factory_code)
            .ok_or(StockError::ProductNotFound)?;

        let inflow = Inflow {
            id: MovementId(self.next_inflow_id.fetch_add(1, Ordering::SeqCst)),
            factory_code: submission.factory_code,
            quantity: submission.quantity,
            unit_price: submission.unit_price,
            total_price: submission.total_price,
            invoice_ref: submission.invoice_ref,
            recorded_at: Utc::now(),
        };
        record.record_inflow(inflow.clone())?;
        Ok(inflow)
    }

    /// Records a stock outflow, enforcing the admission check.
    ///
    /// The balance check and the insert happen inside the product's critical
    /// section, so concurrent outflows against one product cannot jointly
    /// overdraw it. A rejected outflow mutates nothing.
    ///
    /// # Errors
    ///
    /// - [`StockError::ProductNotFound`] when the factory code has no
    ///   registered product.
    /// - [`StockError::InvalidQuantity`] when the quantity is zero.
    /// - [`StockError::InsufficientBalance`] when the quantity exceeds the
    ///   current balance.
    pub fn record_outflow(&self, submission: NewOutflow) -> Result<Outflow, StockError> {
        let submission = submission.normalized();
        let record = self
            .products
            .get(&submission.factory_code)
            .ok_or(StockError::ProductNotFound)?;

        let outflow = Outflow {
            id: MovementId(self.next_outflow_id.fetch_add(1, Ordering::SeqCst)),
            factory_code: submission.factory_code,
            description: submission.description,
            quantity: submission.quantity,
            truck_plate: submission.truck_plate,
            recipient: submission.recipient,
            recorded_at: Utc::now(),
        };
        record.record_outflow(outflow)
    }

    /// Current balance for a factory code.
    ///
    /// Unknown codes and products without movements both report 0; absence
    /// of rows is not an error.
    pub fn balance(&self, code: &FactoryCode) -> i64 {
        self.products
            .get(code)
            .map(|record| record.balance())
            .unwrap_or(0)
    }

    /// All outflow rows across every product, newest first.
    ///
    /// Ordered by registration time descending, ties broken by row id
    /// descending.
    pub fn outflow_history(&self) -> Vec<Outflow> {
        let mut rows: Vec<Outflow> = self
            .products
            .iter()
            .flat_map(|record| record.value().outflows())
            .collect();
        rows.sort_by(|a, b| (b.recorded_at, b.id).cmp(&(a.recorded_at, a.id)));
        rows
    }

    /// Snapshot of every registered product.
    pub fn products(&self) -> Vec<Product> {
        self.products
            .iter()
            .map(|record| record.value().product())
            .collect()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
