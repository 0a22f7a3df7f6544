use std::fmt::Display;

use uuid::Uuid;

/// Identifier for one guest session, minted by the identity middleware
/// and carried between requests by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Creates a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The caller's identity as established by the upstream identity provider.
///
/// Guests carry nothing but their session id; no guest state survives a
/// change of session. Code that behaves differently per variant matches
/// exhaustively rather than testing a flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Identity {
    Authenticated { user_id: i32 },
    Guest { session: SessionId },
}
