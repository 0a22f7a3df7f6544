use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

use crate::models::{Identity, SessionId};

/// HTTP header carrying the authenticated account id. Set by the fronting
/// auth layer, which this service trusts; absence means a guest.
pub const USER_ID_HEADER: &str = "x-user-id";

/// HTTP header carrying a guest's session id.
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Middleware that resolves the caller's [`Identity`] once per request.
///
/// An `x-user-id` header wins over any session header. Guests without a
/// usable `x-session-id` get a fresh session, and guest responses echo
/// the session id so first-time callers learn which id to present next
/// time. A malformed user id header is treated as a guest rather than
/// rejected.
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    let identity = identity_from_headers(&request);
    request.extensions_mut().insert(identity);

    let mut response = next.run(request).await;

    if let Identity::Guest { session } = identity {
        if let Ok(header_value) = HeaderValue::from_str(&session.to_string()) {
            response
                .headers_mut()
                .insert(SESSION_ID_HEADER, header_value);
        }
    }

    response
}

fn identity_from_headers(request: &Request) -> Identity {
    if let Some(user_id) = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<i32>().ok())
    {
        return Identity::Authenticated { user_id };
    }

    let session = request
        .headers()
        .get(SESSION_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(SessionId)
        .unwrap_or_else(SessionId::new);

    Identity::Guest { session }
}
