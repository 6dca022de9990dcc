//! # medkb-core
//!
//! Core types shared by every medkb crate.
//!
//! This crate provides:
//! - Content entities read from the external content store (knowledge entries,
//!   symptoms, diseases) and the append-only search log record
//! - Tier enums (content kind, difficulty, urgency, severity)
//! - Response shapes returned to the chatbot layer
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
