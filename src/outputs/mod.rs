//! Output generation for JSON and Markdown digests.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`Digest`](crate::models::Digest) to a JSON file
//! - [`markdown`]: Renders the digest as a readable Markdown document
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2024-06-01/
//!     └── 삼성라이온즈.json
//!
//! markdown_output_dir/
//! └── 2024-06-01_삼성라이온즈.md
//! ```

pub mod json;
pub mod markdown;
