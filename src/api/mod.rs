//! HTTP API module for the staffing engine.
//!
//! This module exposes the Erlang C model and the staffing forecast as a
//! JSON API. It is the only layer that logs; the calculation core stays
//! free of I/O.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ForecastRequest, IntervalRequest, WaitProbabilityRequest};
pub use response::{
    ApiError, COLUMN_AGENTS_NO_SHRINKAGE, COLUMN_AGENTS_WITH_SHRINKAGE, COLUMN_INBOUND_CALLS,
    COLUMN_INTERVAL, COLUMN_WORKLOAD, ForecastTable, WaitProbabilityResponse,
};
pub use state::AppState;
