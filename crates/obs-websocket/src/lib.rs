// obs-websocket request/response client
//
// This library speaks the obs-websocket v5 protocol: it identifies with OBS
// (answering the password challenge when one is issued), correlates request
// responses by id, and exposes the scene and scene item operations used to
// read and change a source's visibility.

mod auth;
mod client;
mod config;
mod error;
mod request_builder;
mod types;

pub use auth::auth_response;
pub use client::{Incoming, ObsClient};
pub use config::ObsConfig;
pub use error::{ObsClientError, Result, RESOURCE_NOT_FOUND};
pub use request_builder::{ObsRequestBuilder, PreparedRequest};
pub use types::{AuthChallenge, ObsRequestType, ObsScene};
