//! Authentication domain types

mod types;

pub use types::{
    LoginRequest, MessageResponse, RefreshRequest, RegisterRequest, ResendConfirmationRequest,
    Session, TokenPair, TokenResponse, UserRead, UserType, token_preview,
};
