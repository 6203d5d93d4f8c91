//! Role, credential and token handling shared by the MaskService backends

pub mod credentials;
pub mod jwt;
pub mod roles;

pub use credentials::CredentialTable;
pub use jwt::{TokenClaims, TokenService};
pub use roles::Role;
