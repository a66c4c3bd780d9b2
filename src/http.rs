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

//! HTTP/JSON surface for the inventory ledger.
//!
//! ## Endpoints
//!
//! - `POST /products` - Register a product
//! - `GET /products/search` - Single-result product lookup
//! - `POST /inflows` - Record a stock inflow
//! - `POST /outflows` - Record a stock outflow (admission-checked)
//! - `GET /outflows/history` - All outflows, newest first
//! - `GET /balance/{factoryCode}` - Derived balance for one product
//!
//! ## Example Usage
//!
//! ```bash
//! curl -X POST http://localhost:3000/products \
//!   -H "Content-Type: application/json" \
//!   -d '{"factoryCode": "X-500", "description": "Brake pad set"}'
//!
//! curl -X POST http://localhost:3000/inflows \
//!   -H "Content-Type: application/json" \
//!   -d '{"factoryCode": "X-500", "quantity": 10, "unitPrice": "12.50", "totalPrice": "125.00"}'
//!
//! curl http://localhost:3000/balance/X-500
//! ```

use crate::base::FactoryCode;
use crate::ledger::Ledger;
use crate::movement::{Inflow, NewInflow, NewOutflow, Outflow};
use crate::product::{Product, ProductQuery};
use crate::StockError;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// === Request/Response DTOs ===

/// Request body for `POST /products`.
///
/// All fields are optional at the serde level so that missing required
/// fields surface as the service's own 400 instead of a deserialization
/// rejection. Blank strings count as missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProductRequest {
    pub factory_code: Option<String>,
    pub supplier_code: Option<String>,
    pub description: Option<String>,
    pub supplier_name: Option<String>,
    pub unit_of_measure: Option<String>,
}

impl RegisterProductRequest {
    fn into_product(self) -> Result<Product, StockError> {
        let factory_code = required(self.factory_code, "factoryCode")?;
        let description = required(self.description, "description")?;
        Ok(Product::new(
            FactoryCode::new(factory_code),
            self.supplier_code,
            description,
            self.supplier_name,
            self.unit_of_measure,
        ))
    }
}

/// Request body for `POST /inflows`. Only `invoiceRef` is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflowRequest {
    pub factory_code: Option<String>,
    pub quantity: Option<u32>,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub invoice_ref: Option<String>,
}

impl InflowRequest {
    fn into_submission(self) -> Result<NewInflow, StockError> {
        Ok(NewInflow {
            factory_code: FactoryCode::new(required(self.factory_code, "factoryCode")?),
            quantity: self.quantity.ok_or(StockError::MissingField("quantity"))?,
            unit_price: self.unit_price.ok_or(StockError::MissingField("unitPrice"))?,
            total_price: self
                .total_price
                .ok_or(StockError::MissingField("totalPrice"))?,
            invoice_ref: self.invoice_ref,
        })
    }
}

/// Request body for `POST /outflows`. Only `description` is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutflowRequest {
    pub factory_code: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub truck_plate: Option<String>,
    pub recipient: Option<String>,
}

impl OutflowRequest {
    fn into_submission(self) -> Result<NewOutflow, StockError> {
        Ok(NewOutflow {
            factory_code: FactoryCode::new(required(self.factory_code, "factoryCode")?),
            description: self.description,
            quantity: self.quantity.ok_or(StockError::MissingField("quantity"))?,
            truck_plate: required(self.truck_plate, "truckPlate")?,
            recipient: required(self.recipient, "recipient")?,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, StockError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(StockError::MissingField(field))
}

/// Response body for `GET /balance/{factoryCode}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub factory_code: FactoryCode,
    pub balance: i64,
}

/// Response body for errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// === Application State ===

/// Shared application state containing the ledger store handle.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
}

// === Error Handling ===

/// Wrapper for converting `StockError` into HTTP responses.
pub struct AppError(pub StockError);

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            StockError::MissingField(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELD"),
            StockError::InvalidQuantity => (StatusCode::BAD_REQUEST, "INVALID_QUANTITY"),
            StockError::InsufficientBalance => (StatusCode::CONFLICT, "INSUFFICIENT_BALANCE"),
            StockError::ProductNotFound => (StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND"),
            StockError::DuplicateProduct => (StatusCode::CONFLICT, "DUPLICATE_PRODUCT"),
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

/// POST /products - Register a new product.
async fn register_product(
    State(state): State<AppState>,
    Json(request): Json<RegisterProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = request.into_product()?;
    state.ledger.register_product(product.clone())?;
    tracing::info!(factory_code = %product.factory_code, "product registered");
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products/search - Single-result lookup by one criterion.
async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Product>, AppError> {
    let criterion = query
        .criterion()
        .ok_or(StockError::MissingField("search criterion"))?;

    state
        .ledger
        .find_product(&criterion)
        .map(Json)
        .ok_or_else(|| AppError(StockError::ProductNotFound))
}

/// POST /inflows - Record a stock inflow.
async fn create_inflow(
    State(state): State<AppState>,
    Json(request): Json<InflowRequest>,
) -> Result<(StatusCode, Json<Inflow>), AppError> {
    let submission = request.into_submission()?;
    let inflow = state.ledger.record_inflow(submission)?;
    tracing::info!(
        factory_code = %inflow.factory_code,
        quantity = inflow.quantity,
        "inflow recorded"
    );
    Ok((StatusCode::CREATED, Json(inflow)))
}

/// POST /outflows - Record a stock outflow, rejecting overdraws.
async fn create_outflow(
    State(state): State<AppState>,
    Json(request): Json<OutflowRequest>,
) -> Result<(StatusCode, Json<Outflow>), AppError> {
    let submission = request.into_submission()?;
    let factory_code = submission.factory_code.clone();
    let quantity = submission.quantity;

    match state.ledger.record_outflow(submission) {
        Ok(outflow) => {
            tracing::info!(
                factory_code = %outflow.factory_code,
                quantity = outflow.quantity,
                "outflow recorded"
            );
            Ok((StatusCode::CREATED, Json(outflow)))
        }
        Err(err) => {
            if err == StockError::InsufficientBalance {
                tracing::warn!(
                    factory_code = %factory_code,
                    quantity,
                    "outflow rejected: insufficient balance"
                );
            }
            Err(err.into())
        }
    }
}

/// GET /outflows/history - All outflow rows, newest first.
async fn outflow_history(State(state): State<AppState>) -> Json<Vec<Outflow>> {
    Json(state.ledger.outflow_history())
}

/// GET /balance/{factoryCode} - Derived balance; 0 for unknown codes.
async fn get_balance(
    State(state): State<AppState>,
    Path(factory_code): Path<String>,
) -> Json<BalanceResponse> {
    let factory_code = FactoryCode::new(factory_code);
    let balance = state.ledger.balance(&factory_code);
    Json(BalanceResponse {
        factory_code,
        balance,
    })
}

// === Router ===

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/products", post(register_product))
        .route("/products/search", get(search_products))
        .route("/inflows", post(create_inflow))
        .route("/outflows", post(create_outflow))
        .route("/outflows/history", get(outflow_history))
        .route("/balance/{factoryCode}", get(get_balance))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_field_is_missing() {
        let request = RegisterProductRequest {
            factory_code: Some("   ".to_string()),
            supplier_code: None,
            description: Some("Widget".to_string()),
            supplier_name: None,
            unit_of_measure: None,
        };
        assert_eq!(
            request.into_product(),
            Err(StockError::MissingField("factoryCode"))
        );
    }

    #[test]
    fn product_request_normalizes_codes() {
        let request = RegisterProductRequest {
            factory_code: Some("x-500".to_string()),
            supplier_code: Some("sup-9".to_string()),
            description: Some("Widget".to_string()),
            supplier_name: None,
            unit_of_measure: None,
        };
        let product = request.into_product().unwrap();
        assert_eq!(product.factory_code, FactoryCode::new("X-500"));
        assert_eq!(product.supplier_code.as_deref(), Some("SUP-9"));
    }

    #[test]
    fn inflow_request_requires_prices() {
        let request = InflowRequest {
            factory_code: Some("X-500".to_string()),
            quantity: Some(10),
            unit_price: None,
            total_price: None,
            invoice_ref: None,
        };
        let result = request.into_submission();
        assert!(matches!(result, Err(StockError::MissingField("unitPrice"))));
    }

    #[test]
    fn outflow_request_requires_truck_plate_and_recipient() {
        let request = OutflowRequest {
            factory_code: Some("X-500".to_string()),
            description: None,
            quantity: Some(2),
            truck_plate: None,
            recipient: Some("Depot 4".to_string()),
        };
        let result = request.into_submission();
        assert!(matches!(result, Err(StockError::MissingField("truckPlate"))));
    }
}
