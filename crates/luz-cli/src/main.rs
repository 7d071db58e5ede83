// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Luz CLI - build, run, and format .lz scripts.

use std::env;
use std::fs;
use std::path::Path;
use std::process::{self, Command};

use luz_codegen::generate;
use luz_diagnostics::formatter::DiagnosticFormatter;
use luz_diagnostics::{json, Diagnostic, Phase};
use luz_lexer::Lexer;
use luz_parser::Parser;

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let json_output = args.iter().any(|a| a == "--json");
    args.retain(|a| a != "--json");

    if args.is_empty() {
        print_usage();
        process::exit(1);
    }

    match args[0].as_str() {
        "build" => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: luz build <file.lz>");
                process::exit(1);
            };
            cmd_build(path, json_output);
        }
        "run" => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: luz run <file.lz>");
                process::exit(1);
            };
            cmd_run(path, json_output);
        }
        "fmt" => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: luz fmt <file.lz>");
                process::exit(1);
            };
            cmd_fmt(path);
        }
        "lsp" => luz_lsp::run_stdio(),
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => println!("luz {}", env!("CARGO_PKG_VERSION")),
        other => {
            // Shebang support: `luz file.lz` means `luz run file.lz`.
            if other.ends_with(".lz") {
                cmd_run(other, json_output);
            } else {
                eprintln!("Unknown command: {}", other);
                print_usage();
                process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Luz {} - a Bash transpiler", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: luz <command> [args]");
    println!();
    println!("Commands:");
    println!("  build <file.lz>  Compile to <file>.sh next to the source");
    println!("  run <file.lz>    Compile and execute with bash");
    println!("  fmt <file.lz>    Reformat in place");
    println!("  lsp              Start the language server on stdio");
    println!("  help             Show this help");
    println!("  version          Show version");
    println!();
    println!("Options:");
    println!("  --json           Print diagnostics as JSON (build/run)");
    println!();
    println!("Running `luz <file.lz>` is shorthand for `luz run <file.lz>`.");
}

fn cmd_build(path: &str, json_output: bool) {
    let script = compile_file(path, json_output).unwrap_or_else(|_| process::exit(1));

    let out_path = Path::new(path).with_extension("sh");
    if let Err(e) = fs::write(&out_path, &script) {
        eprintln!("Error writing {}: {}", out_path.display(), e);
        process::exit(1);
    }
    if let Err(e) = make_executable(&out_path) {
        eprintln!("Error setting permissions on {}: {}", out_path.display(), e);
        process::exit(1);
    }

    println!("Built {} -> {}", path, out_path.display());
}

fn cmd_run(path: &str, json_output: bool) {
    let script = compile_file(path, json_output).unwrap_or_else(|_| process::exit(1));

    let tmp = tempfile::Builder::new()
        .prefix("luz-")
        .suffix(".sh")
        .tempfile()
        .and_then(|mut tmp| {
            use std::io::Write;
            tmp.write_all(script.as_bytes())?;
            Ok(tmp)
        });
    let tmp = match tmp {
        Ok(tmp) => tmp,
        Err(e) => {
            eprintln!("Error creating temp file: {}", e);
            process::exit(1);
        }
    };

    // Inherited stdio; the child's exit code becomes ours.
    let status = Command::new("bash").arg(tmp.path()).status();
    let code = match status {
        Ok(status) => status.code().unwrap_or(1),
        Err(e) => {
            eprintln!("Error running bash: {}", e);
            1
        }
    };

    // Delete the temp file before exiting: process::exit skips drops.
    let _ = tmp.close();
    process::exit(code);
}

fn cmd_fmt(path: &str) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            process::exit(1);
        }
    };

    let formatted = luz_fmt::format_source(&source);
    if formatted == source {
        return;
    }

    if let Err(e) = fs::write(path, formatted) {
        eprintln!("Error writing {}: {}", path, e);
        process::exit(1);
    }
}

/// The full front-end pipeline: read, lex, parse, resolve imports,
/// generate. Any error is reported to stderr and fails the build.
fn compile_file(path: &str, json_output: bool) -> Result<String, ()> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return Err(());
        }
    };

    let tokens = Lexer::new(&source).tokenize();
    let result = Parser::new(tokens).parse();
    if !result.is_ok() {
        let diagnostics: Vec<Diagnostic> = result
            .errors
            .iter()
            .map(|e| Diagnostic::new(Phase::Parse, e.line, e.col, e.message.clone()))
            .collect();
        report(&source, path, &diagnostics, json_output);
        return Err(());
    }

    let mut program = result.program;
    if let Err(err) = luz_resolve::resolve(&mut program, Path::new(path)) {
        let diagnostics = vec![Diagnostic::unpositioned(Phase::Resolve, err.to_string())];
        report(&source, path, &diagnostics, json_output);
        return Err(());
    }

    let output = generate(&program);
    if !output.errors.is_empty() {
        let diagnostics: Vec<Diagnostic> = output
            .errors
            .iter()
            .map(|msg| Diagnostic::unpositioned(Phase::Codegen, msg.clone()))
            .collect();
        report(&source, path, &diagnostics, json_output);
        return Err(());
    }

    Ok(output.script)
}

fn report(source: &str, path: &str, diagnostics: &[Diagnostic], json_output: bool) {
    if json_output {
        eprintln!("{}", json::to_json(path, diagnostics));
    } else {
        let formatter = DiagnosticFormatter::new(source, path);
        eprint!("{}", formatter.format_batch(diagnostics));
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
