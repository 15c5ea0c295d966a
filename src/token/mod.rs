//! VideoSDK authorization tokens
//!
//! Tokens are HS256-signed JWTs carrying the API key and a permission grant.
//! They are verified by VideoSDK, never by this service.

mod claims;
mod signer;

pub use claims::{Claims, Permission};
pub use signer::{IssuedToken, TokenError, TokenSigner};
