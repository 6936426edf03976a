//! App access tokens for the Helix API.
pub mod access;
pub mod creds;
pub mod error;

pub use access::AccessTokenManager;
pub use creds::AccessToken;
pub use error::AccessTokenManagerError;
