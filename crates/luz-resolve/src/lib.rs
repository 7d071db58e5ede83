// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Import resolution.
//!
//! Between parsing and code generation, every `import "file.lz"`
//! statement is replaced by the imported file's top-level statements,
//! recursively, with each path resolved relative to the importing
//! file's directory. A visited set over canonical paths guarantees no
//! file is read twice and turns cycles into `circular import` errors.

mod error;
mod resolver;

pub use error::ResolveError;
pub use resolver::resolve;
