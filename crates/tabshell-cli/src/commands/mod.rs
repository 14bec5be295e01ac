pub mod auth;
pub mod navigate;
pub mod request;
pub mod tabs;
