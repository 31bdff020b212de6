pub mod access;

/// Header that carries the access credential.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";
