use crate::token::TokenSigner;
use crate::videosdk::MeetingsApi;
use std::sync::Arc;

/// Shared application state for HTTP handlers
///
/// Both members are immutable after startup, so handlers share them without locking.
#[derive(Clone)]
pub struct AppState {
    /// Signs tokens handed out by /get-token
    pub signer: Arc<TokenSigner>,

    /// Upstream meetings API
    pub meetings: Arc<dyn MeetingsApi>,
}

impl AppState {
    pub fn new(signer: TokenSigner, meetings: Arc<dyn MeetingsApi>) -> Self {
        Self {
            signer: Arc::new(signer),
            meetings,
        }
    }
}
