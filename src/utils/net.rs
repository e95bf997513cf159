use tokio::net::TcpListener;

use crate::errors::CreationError;
use crate::Result;

/// Allocates a fresh, locally-unique listen address by binding port 0 and
/// immediately releasing the listener.
pub async fn alloc_ephemeral_addr() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(CreationError::AddressAllocation)?;
    let addr = listener.local_addr().map_err(CreationError::AddressAllocation)?;
    drop(listener);
    Ok(addr.to_string())
}

/// accept ip either like 127.0.0.1 or docker host name: node1
pub(crate) fn normalize_addr(addr: &str) -> String {
    // Strip existing "http://" or "https://" prefixes if duplicated.
    let normalized = addr.trim_start_matches("http://").trim_start_matches("https://");
    // Re-add a single "http://" prefix (or use HTTPS if needed).
    format!("http://{}", normalized)
}
