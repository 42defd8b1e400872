//! Authentication and default headers
//!
//! Every request carries the same bearer token and API version headers;
//! `content-type` is only added for methods that send a body.

mod authenticator;

pub use authenticator::{
    build_headers, Authenticator, ACCEPT_VERSION, HEADER_ACCEPT, HEADER_ACCEPT_VERSION,
    HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, JSON_MEDIA_TYPE,
};
