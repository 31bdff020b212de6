pub mod access_jwt;
pub mod factory;
pub mod identity;
pub mod token_signer;

pub use access_jwt::AuthService;
pub use factory::build_auth_service;
pub use identity::Identity;
pub use token_signer::TokenSigner;
