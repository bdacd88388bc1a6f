//! `emlview` — a terminal viewer and decoder for `.eml` email files.
//!
//! This crate provides the core library for parsing a single RFC 822/MIME
//! message into decoded headers, text/HTML bodies, and attachments, with
//! particular care for common Japanese encodings.

pub mod config;
pub mod error;
pub mod export;
pub mod i18n;
pub mod model;
pub mod parser;
