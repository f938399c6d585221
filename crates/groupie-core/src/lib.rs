//! Artist and tour catalog: feed client, join, concert sorts and search.

pub mod catalog;
pub mod concerts;
pub mod config;
pub mod dates;
pub mod feeds;
pub mod location;
pub mod model;
pub mod pages;
pub mod platform;
