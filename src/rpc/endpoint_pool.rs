use crate::error::WalletError;

/// Ordered RPC endpoints plus the cursor naming the current one
///
/// The cursor only moves through `rotate`. A scan run owns one pool for its
/// whole duration, so a failing endpoint stays rotated away from across
/// addresses instead of being retried first for each of them.
#[derive(Debug, Clone)]
pub struct EndpointPool {
    endpoints: Vec<String>,
    cursor: usize,
}

impl EndpointPool {
    pub fn new(endpoints: Vec<String>) -> Result<Self, WalletError> {
        if endpoints.is_empty() {
            return Err(WalletError::Config(
                "endpoint pool needs at least one RPC URL".into(),
            ));
        }
        Ok(Self {
            endpoints,
            cursor: 0,
        })
    }

    pub fn current_endpoint(&self) -> &str {
        &self.endpoints[self.cursor]
    }

    /// Advance to the next endpoint, wrapping at the end of the list
    pub fn rotate(&mut self) {
        self.cursor = (self.cursor + 1) % self.endpoints.len();
        log::debug!("Rotated RPC endpoint to {}", self.current_endpoint());
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
