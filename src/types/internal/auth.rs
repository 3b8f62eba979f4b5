use serde::{Deserialize, Serialize};

/// JWT claims carried by an access token.
///
/// `sub` is the user id; `roles` holds the user's role names at issue time.
/// Issuer and audience are validated on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}
