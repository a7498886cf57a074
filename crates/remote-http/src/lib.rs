//! HTTP implementation of the session crate's remote content contract.
//!
//! Speaks the instructor course API: multipart video upload with streamed
//! progress, JSON fetch/delete/save. All failures map into the session
//! error taxonomy; nothing here panics on wire trouble.

mod store;
mod wire;

pub use store::HttpContentStore;
