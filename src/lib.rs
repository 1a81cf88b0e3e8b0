//! everbloom: backend and admin panel for a small wellness & coaching
//! marketing site.
//!
//! - Storage: Sled trees per collection with Serde-JSON documents
//! - Surface: Axum JSON CRUD handlers plus server-rendered pages
//! - Admin: single-password login minting an opaque token; a presence-only
//!   gate redirects tokenless browsers away from `/admin/*`

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod pages;
pub mod rest;
pub mod storage;
