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

//! # Stock Ledger
//!
//! This library provides an inventory ledger for a small logistics
//! operation: product registration, stock inflows and outflows, and
//! per-product balance derivation.
//!
//! ## Core Components
//!
//! - [`Ledger`]: The store handle holding products and movement history
//! - [`StockRecord`]: A single product with its append-only movements
//! - [`Product`] / [`Inflow`] / [`Outflow`]: The three persisted entities
//! - [`StockError`]: Error types for stock operation failures
//!
//! ## Example
//!
//! ```
//! use stock_ledger_rs::{FactoryCode, Ledger, NewInflow, Product};
//! use rust_decimal_macros::dec;
//!
//! let ledger = Ledger::new();
//!
//! let code = FactoryCode::new("X-500");
//! ledger
//!     .register_product(Product::new(code.clone(), None, "Brake pad set".into(), None, None))
//!     .unwrap();
//!
//! ledger
//!     .record_inflow(NewInflow {
//!         factory_code: code.clone(),
//!         quantity: 10,
//!         unit_price: dec!(12.50),
//!         total_price: dec!(125.00),
//!         invoice_ref: None,
//!     })
//!     .unwrap();
//!
//! assert_eq!(ledger.balance(&code), 10);
//! ```
//!
//! ## Thread Safety
//!
//! The ledger serializes the outflow admission check per product, so
//! concurrent outflows can never jointly overdraw a balance, while
//! operations on different products proceed in parallel.

mod base;
pub mod error;
pub mod http;
mod ledger;
mod movement;
mod product;
pub mod stock;

pub use base::{FactoryCode, MovementId};
pub use error::StockError;
pub use ledger::Ledger;
pub use movement::{Inflow, NewInflow, NewOutflow, Outflow};
pub use product::{Criterion, Product, ProductQuery};
pub use stock::StockRecord;
