//! Application use cases (business logic orchestration).

mod sign_in;
mod sign_out;
mod upload_media;

pub use sign_in::*;
pub use sign_out::*;
pub use upload_media::*;
