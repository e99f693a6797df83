//! REST
//! provides the HTTP server and its endpoint handlers

#[macro_use]
pub mod macros;
pub mod api;
pub mod identity;
pub mod response;
pub mod server;
