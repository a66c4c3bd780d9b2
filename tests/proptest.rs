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

//! Property-based tests for the inventory ledger.
//!
//! These tests verify invariants that should hold for any sequence of
//! recorded movements.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stock_ledger_rs::{FactoryCode, Ledger, NewInflow, NewOutflow, Product};

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Generate a positive movement quantity.
fn arb_quantity() -> impl Strategy<Value = u32> {
    1u32..=1_000
}

/// A movement to replay: positive values are inflows, negative are outflow
/// attempts (which may legitimately be rejected).
fn arb_movements() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(
        prop_oneof![
            arb_quantity().prop_map(|q| i64::from(q)),
            arb_quantity().prop_map(|q| -i64::from(q)),
        ],
        1..40,
    )
}

fn ledger_with_product(code: &FactoryCode) -> Ledger {
    let ledger = Ledger::new();
    ledger
        .register_product(Product::new(
            code.clone(),
            None,
            "Replayed part".to_string(),
            None,
            None,
        ))
        .unwrap();
    ledger
}

fn inflow(code: &FactoryCode, quantity: u32) -> NewInflow {
    NewInflow {
        factory_code: code.clone(),
        quantity,
        unit_price: dec!(1.00),
        total_price: Decimal::from(quantity),
        invoice_ref: None,
    }
}

fn outflow(code: &FactoryCode, quantity: u32) -> NewOutflow {
    NewOutflow {
        factory_code: code.clone(),
        description: None,
        quantity,
        truck_plate: "ABC1D23".to_string(),
        recipient: "Depot 4".to_string(),
    }
}

// =============================================================================
// Balance Invariant Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// After any replay, balance equals the sum of committed inflow
    /// quantities minus the sum of committed outflow quantities.
    #[test]
    fn balance_equals_committed_running_difference(movements in arb_movements()) {
        let code = FactoryCode::new("X-500");
        let ledger = ledger_with_product(&code);

        let mut committed: i64 = 0;
        for movement in &movements {
            if *movement > 0 {
                let quantity = *movement as u32;
                ledger.record_inflow(inflow(&code, quantity)).unwrap();
                committed += *movement;
            } else {
                let quantity = (-*movement) as u32;
                if ledger.record_outflow(outflow(&code, quantity)).is_ok() {
                    committed += *movement;
                }
            }
        }

        prop_assert_eq!(ledger.balance(&code), committed);
    }

    /// The balance never goes negative, whatever the movement sequence.
    #[test]
    fn balance_never_negative(movements in arb_movements()) {
        let code = FactoryCode::new("X-500");
        let ledger = ledger_with_product(&code);

        for movement in &movements {
            if *movement > 0 {
                let _ = ledger.record_inflow(inflow(&code, *movement as u32));
            } else {
                let _ = ledger.record_outflow(outflow(&code, (-*movement) as u32));
            }
            prop_assert!(ledger.balance(&code) >= 0);
        }
    }

    /// A rejected outflow leaves both the balance and the history untouched.
    #[test]
    fn rejected_outflow_mutates_nothing(
        stocked in arb_quantity(),
        excess in 1u32..=1_000,
    ) {
        let code = FactoryCode::new("X-500");
        let ledger = ledger_with_product(&code);
        ledger.record_inflow(inflow(&code, stocked)).unwrap();

        let before_balance = ledger.balance(&code);
        let before_history = ledger.outflow_history();

        let result = ledger.record_outflow(outflow(&code, stocked + excess));
        prop_assert!(result.is_err());
        prop_assert_eq!(ledger.balance(&code), before_balance);
        prop_assert_eq!(ledger.outflow_history(), before_history);
    }
}

// =============================================================================
// Inflow Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Sum of inflow quantities equals the balance when nothing flows out.
    #[test]
    fn inflows_sum_to_balance(quantities in prop::collection::vec(arb_quantity(), 1..20)) {
        let code = FactoryCode::new("X-500");
        let ledger = ledger_with_product(&code);

        for quantity in &quantities {
            ledger.record_inflow(inflow(&code, *quantity)).unwrap();
        }

        let expected: i64 = quantities.iter().map(|q| i64::from(*q)).sum();
        prop_assert_eq!(ledger.balance(&code), expected);
    }

    /// Draining the exact balance always succeeds and lands on zero.
    #[test]
    fn exact_drain_lands_on_zero(quantities in prop::collection::vec(arb_quantity(), 1..10)) {
        let code = FactoryCode::new("X-500");
        let ledger = ledger_with_product(&code);

        let mut total: i64 = 0;
        for quantity in &quantities {
            ledger.record_inflow(inflow(&code, *quantity)).unwrap();
            total += i64::from(*quantity);
        }

        ledger.record_outflow(outflow(&code, total as u32)).unwrap();
        prop_assert_eq!(ledger.balance(&code), 0);
    }
}
