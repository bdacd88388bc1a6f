//! Core data model types for parsed emails and attachments.

pub mod attachment;
pub mod email;
