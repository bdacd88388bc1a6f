//! Export functionality: writing decoded attachments to disk.

pub mod attachment;
