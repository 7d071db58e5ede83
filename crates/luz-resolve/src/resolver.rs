// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The resolver implementation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use luz_ast::stmt::{Program, Stmt};
use luz_lexer::Lexer;
use luz_parser::Parser;

use crate::error::ResolveError;

/// Resolve all imports of `program`, which was parsed from
/// `source_path`. On success the program contains no `Import`
/// statements; each one has been replaced in place by the imported
/// file's statements.
pub fn resolve(program: &mut Program, source_path: &Path) -> Result<(), ResolveError> {
    let mut visited = HashSet::new();

    // The entry file counts as visited so that importing it back
    // closes the cycle.
    if let Ok(canonical) = source_path.canonicalize() {
        visited.insert(canonical);
    }

    let base_dir = source_path.parent().unwrap_or_else(|| Path::new("."));
    let statements = std::mem::take(&mut program.statements);
    program.statements = splice(statements, base_dir, &mut visited)?;
    Ok(())
}

/// Replace each import statement with the statements of the file it
/// names, resolved depth-first in source order.
fn splice(
    statements: Vec<Stmt>,
    base_dir: &Path,
    visited: &mut HashSet<PathBuf>,
) -> Result<Vec<Stmt>, ResolveError> {
    let mut resolved = Vec::with_capacity(statements.len());

    for stmt in statements {
        match stmt {
            Stmt::Import { path } => {
                let imported = load(&base_dir.join(&path), visited)?;
                resolved.extend(imported);
            }
            other => resolved.push(other),
        }
    }

    Ok(resolved)
}

/// Read, tokenize, and parse one imported file, then resolve its own
/// imports relative to its directory.
fn load(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Vec<Stmt>, ResolveError> {
    let canonical = path.canonicalize().map_err(|source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !visited.insert(canonical.clone()) {
        return Err(ResolveError::CircularImport { path: canonical });
    }

    let source = fs::read_to_string(&canonical).map_err(|source| ResolveError::Io {
        path: canonical.clone(),
        source,
    })?;

    let tokens = Lexer::new(&source).tokenize();
    let result = Parser::new(tokens).parse();
    if let Some(err) = result.first_error() {
        return Err(ResolveError::Parse {
            path: canonical,
            line: err.line,
            col: err.col,
            message: err.message.clone(),
        });
    }

    let base_dir = canonical.parent().unwrap_or_else(|| Path::new("."));
    splice(result.program.statements, base_dir, visited)
}
