//! Shared types for the mdlforge alias model toolchain.
//!
//! - [`model_format`] - the single source of truth for IDPO format constants
//! - [`fs`] - size-capped reads and atomic writes

pub mod fs;
pub mod model_format;

pub use model_format::{MDL_FORMAT, ModelFormat};
