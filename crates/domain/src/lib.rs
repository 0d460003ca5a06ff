//! Flockloop Domain - Core business types
//!
//! This crate defines the wire model of the Flockloop marketplace API
//! and the request/response descriptors the client moves around.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod campaigns;
pub mod error;
pub mod media;
pub mod organisations;
pub mod request;
pub mod response;
pub mod storage_url;
pub mod submissions;
pub mod tracks;

pub use auth::{
    LoginRequest, MessageResponse, RefreshRequest, RegisterRequest, ResendConfirmationRequest,
    Session, TokenPair, TokenResponse, UserRead, UserType, token_preview,
};
pub use campaigns::{CampaignCreate, CampaignRead, LinkType};
pub use error::{DomainError, DomainResult};
pub use media::{
    DownloadResponse, MediaRead, MediaStatus, MediaType, UploadRequest, UploadResponse,
};
pub use organisations::{
    InvitationAcceptRequest, InvitationRead, InvitationSendRequest, InvitationStatus,
    OrgRegistrationRequest, OrgRegistrationResponse,
};
pub use request::{ApiRequest, Header, HttpMethod};
pub use response::{ApiResponse, StatusCode};
pub use storage_url::{RewriteStorageUrls, StorageUrlRewriter};
pub use submissions::{
    SubmissionCreate, SubmissionDecision, SubmissionRead, SubmissionReview, SubmissionStatus,
};
pub use tracks::{TrackCreate, TrackRead, TrackSummary};
