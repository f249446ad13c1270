//! Share-token protocol for levelbook.
//!
//! A share token carries the entire level collection between devices without
//! any server.
//!
//! # Token Format
//!
//! Tokens are formatted as: `base64url(json)` without padding, where `json`
//! is the same JSON array of levels used for persistence. The alphabet is safe
//! inside a URL fragment, so a share link is simply `<page url>#<token>`.
//!
//! Decoding also accepts tokens in the standard base64 alphabet, with or
//! without padding, as produced by older clients.

mod error;
mod token;

pub use error::{DecodeError, EncodeError, ShareError, ShareResult};
pub use token::{decode, encode, share_url, token_from_url, ShareToken};
