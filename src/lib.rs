//! Explorer for the booking platform's API catalog: fetches the catalog
//! document, filters and renders it as a collapsible tree, and builds
//! copy-pasteable `curl` examples per endpoint.

pub mod auth;
pub mod clipboard;
pub mod command;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod models;
pub mod render;
pub mod session;
pub mod web;

#[cfg(test)]
mod test_support;
