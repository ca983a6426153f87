//! Password digests and random token sources.

mod argon2_hasher;
mod random_token;

pub use argon2_hasher::Argon2Hasher;
pub use random_token::RandomTokenGenerator;
