//! Authentication and authorization rules.

mod errors;
mod role;
mod sso;

pub use errors::AuthError;
pub use role::{Actor, Role, Standing};
pub use sso::{decode_hex, SsoPayload, SsoSigner};
