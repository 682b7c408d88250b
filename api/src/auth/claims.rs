use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub admin: bool,
}

/// Decoded claims of the authenticated caller, inserted into request
/// extensions by the guard middleware.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
