//! Session state, token persistence, and claims decoding.

pub mod session;
pub mod store;
pub mod token;

pub use session::AuthSession;
pub use store::TokenStore;
pub use token::{decode_token, encode_token, TokenClaims};
