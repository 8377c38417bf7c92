// Authentication module
// Sign-up, sign-in, JWT access tokens and rotating refresh tokens

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{refresh_handler, sign_in_handler, sign_up_handler, REFRESH_TOKEN_COOKIE};
pub use middleware::AuthenticatedUser;
pub use models::{SignInInput, SignUpInput, SignUpResponse, TokenPair, TokenResponse, User};
pub use password::{PasswordHasher, SaltedSha256Hasher};
pub use repository::{TokenRepository, TokenStore, UserRepository, UserStore};
pub use service::AuthService;
pub use token::TokenService;
