//! Core types & traits: protocol envelopes, errors, and the tool contract.

pub mod content;
pub mod error;
pub mod mcp;
pub mod tool;
