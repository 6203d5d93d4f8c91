//! Error handling module for MaskService
//!
//! This module provides the error types shared by every MaskService backend.

pub mod error;

pub use error::{Result, ServiceError};
