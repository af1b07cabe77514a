mod client;
mod models;

pub use client::{ContentClient, ContentError, Resource, OPEN_CALL_SLUG};
pub use models::*;
