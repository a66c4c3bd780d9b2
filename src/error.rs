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

//! Error types for stock operations.

use thiserror::Error;

/// Stock operation errors.
///
/// Every error is terminal for the request that raised it; there is no retry
/// and no partial commit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// A required request field is missing or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Movement quantity is zero
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    /// Outflow quantity exceeds the current balance
    #[error("insufficient stock balance")]
    InsufficientBalance,

    /// Movement references a factory code with no registered product
    #[error("product not found")]
    ProductNotFound,

    /// Factory code is already registered
    #[error("factory code already registered")]
    DuplicateProduct,
}
