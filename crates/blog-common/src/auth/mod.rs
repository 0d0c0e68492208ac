//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{AccessClaims, JwtService, RefreshClaims, TokenKind, TokenPair};
pub use password::PasswordService;
