//! Main module for URI template functionality
//!
//! Expansion runs `scanner` -> `operator` + `varspec` -> `template`.
//! Extraction runs `scanner` -> `extraction` -> `encoding::decode`.

pub mod encoding;
pub mod error;
pub mod extraction;
pub mod level;
pub mod operator;
pub mod scanner;
pub mod template;
pub mod value;
pub mod varspec;
