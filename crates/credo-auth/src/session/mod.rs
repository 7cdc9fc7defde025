//! Session delivery to browsers.

pub mod cookie;

pub use cookie::SessionCookies;
