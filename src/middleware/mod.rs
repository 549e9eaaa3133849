pub mod auth;
pub mod response;

pub use auth::{identity_auth_middleware, AuthUser};
pub use response::{response_with_tokens, ResponseWithTokens};
