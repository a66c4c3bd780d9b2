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

use clap::Parser;
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use stock_ledger_rs::Ledger;
use stock_ledger_rs::http::{AppState, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Stock Ledger - Inventory management backend
///
/// Serves the product, inflow, outflow, and balance endpoints over
/// HTTP/JSON. Log verbosity follows RUST_LOG (default: info).
#[derive(Parser, Debug)]
#[command(name = "stock-ledger-rs")]
#[command(about = "An inventory ledger HTTP service", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:3000")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let state = AppState {
        ledger: Arc::new(Ledger::new()),
    };
    let app = create_router(state);

    let listener = match TcpListener::bind(args.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", args.listen, e);
            process::exit(1);
        }
    };

    tracing::info!("stock ledger listening on http://{}", args.listen);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
        process::exit(1);
    }
}
