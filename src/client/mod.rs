//! HTTP clients for the search index service and the primary document store.
//!
//! Both clients are synchronous (`ureq`) and are called from async contexts via
//! `tokio::task::spawn_blocking` through the wrappers in [`async_wrapper`]. They
//! handle authentication headers, error mapping and response decoding; neither
//! retries a failed call.

mod async_wrapper;
mod firestore;
mod index_client;
mod store_client;

pub use async_wrapper::{
    AsyncIndexClient, AsyncIndexClientImpl, AsyncStoreClient, AsyncStoreClientImpl,
};
pub use firestore::decode_value;
pub use index_client::IndexClient;
pub use store_client::StoreClient;

use crate::error::ClientError;

/// Join a base URL and a path with exactly one slash between them.
pub(crate) fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Map a ureq error to a ClientError.
pub(crate) fn map_error(error: ureq::Error) -> ClientError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 | 403 => ClientError::Unauthorized,
                404 => ClientError::NotFound(message),
                429 => ClientError::RateLimitExceeded,
                _ => ClientError::ApiError {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => {
            if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                ClientError::HttpError("Connection failed".to_string())
            } else if transport.kind() == ureq::ErrorKind::Io {
                ClientError::Timeout
            } else {
                ClientError::HttpError(transport.to_string())
            }
        }
    }
}

/// Read a response body as a string.
pub(crate) fn read_body(response: ureq::Response) -> Result<String, ClientError> {
    response
        .into_string()
        .map_err(|e| ClientError::HttpError(e.to_string()))
}
