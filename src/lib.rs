pub mod config;
pub mod error;
pub mod http;
pub mod token;
pub mod videosdk;

pub use config::Config;
pub use error::RelayError;
pub use http::{create_router, AppState};
pub use token::{Claims, IssuedToken, Permission, TokenSigner};
pub use videosdk::{MeetingsApi, UpstreamError, UpstreamResponse, VideoSdkClient};
