//! HTTP API bridging browser clients to VideoSDK
//!
//! - GET / - Liveness check
//! - GET /get-token - Issue a signed token
//! - POST /create-meeting/ - Create a meeting upstream
//! - POST /validate-meeting/:id - Validate a meeting upstream

mod handlers;
mod routes;
mod state;

pub use handlers::{TokenResponse, LIVENESS_MESSAGE};
pub use routes::create_router;
pub use state::AppState;
