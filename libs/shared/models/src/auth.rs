use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Payload of a portal session token. Tokens issued by the user upsert
/// endpoint always carry all three fields; `iat`/`exp` stay optional so
/// externally minted tokens with a bare `email` still verify.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    pub iat: Option<u64>,
    pub exp: Option<u64>,
}

/// Verified token subject, attached to request extensions by the auth
/// middleware for the remainder of the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub email: String,
}
