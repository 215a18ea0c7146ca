use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use litlint::{Finding, Linter, render_finding, render_parse_diagnostic};

use crate::context::Context;
use crate::registry::{CommandSpec, FlagSpec, Registry};

const COMMAND: CommandSpec = CommandSpec {
    name: "check",
    category: "lint",
    summary: "lint files and directories",
    aliases: &["lint"],
    handler: cmd,
};

const LINT_FILE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

pub fn register(registry: &mut Registry) {
    registry.add_command(COMMAND);
    registry.add_flag(FlagSpec {
        name: "--json",
        aliases: &[],
        description: "emit findings as a JSON array",
    });
}

pub fn cmd(context: &Context) {
    match run_check(context) {
        Ok(CheckOutcome::Clean) => {}
        Ok(CheckOutcome::Dirty) => std::process::exit(1),
        Err(message) => {
            stdio::error("check", &message);
            std::process::exit(2);
        }
    }
}

#[derive(Debug)]
enum CheckOutcome {
    Clean,
    Dirty,
}

fn run_check(context: &Context) -> Result<CheckOutcome, String> {
    let cwd = &context.env.cwd;
    let files = resolve_lint_files(cwd, &context.args.positionals)?;
    if files.is_empty() {
        stdio::log("check", "no files to lint");
        return Ok(CheckOutcome::Clean);
    }

    let json = context.args.flags.contains_key("--json");
    let linter = Linter::new(context.settings.clone());

    stdio::log("check", &format!("linting {} file(s)", files.len()));

    let mut findings_total = 0usize;
    let mut parse_failures = 0usize;
    let mut json_findings: Vec<Finding> = Vec::new();

    for file in &files {
        let display = display_path(cwd, file);
        stdio::debug("check", &display);

        let source = fs::read_to_string(file)
            .map_err(|err| format!("failed to read {}: {}", display, err))?;

        match linter.lint_source(&display, &source) {
            Ok(findings) => {
                findings_total += findings.len();
                if json {
                    json_findings.extend(findings);
                } else {
                    for finding in &findings {
                        print!("{}", render_finding(&source, finding));
                    }
                }
            }
            Err(diagnostic) => {
                parse_failures += 1;
                if json {
                    // frames would corrupt the JSON stream, warn on stderr
                    stdio::warn("check", &diagnostic.to_string());
                } else {
                    print!("{}", render_parse_diagnostic(&source, &diagnostic));
                }
            }
        }
    }

    if json {
        let payload = serde_json::to_string_pretty(&json_findings)
            .map_err(|err| format!("failed to serialize findings: {}", err))?;
        println!("{}", payload);
    }

    if findings_total == 0 && parse_failures == 0 {
        stdio::success(&format!("{} file(s), no problems found", files.len()));
        Ok(CheckOutcome::Clean)
    } else {
        stdio::fail(&format!(
            "{} problem(s) found in {} file(s)",
            findings_total + parse_failures,
            files.len()
        ));
        Ok(CheckOutcome::Dirty)
    }
}

/// Expand positional arguments into lintable files. Directories are
/// walked; explicitly listed files are kept regardless of extension.
fn resolve_lint_files(cwd: &Path, inputs: &[String]) -> Result<Vec<PathBuf>, String> {
    if inputs.is_empty() {
        return scan_for_sources(cwd);
    }

    let mut resolved = Vec::new();
    for input in inputs {
        let path = PathBuf::from(input);
        let path = if path.is_absolute() { path } else { cwd.join(path) };
        if path.is_dir() {
            resolved.extend(scan_for_sources(&path)?);
        } else if path.is_file() {
            resolved.push(path);
        } else {
            return Err(format!("no such file or directory: {}", input));
        }
    }
    Ok(unique_paths(resolved))
}

fn scan_for_sources(root: &Path) -> Result<Vec<PathBuf>, String> {
    let mut results = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                return Err(format!("failed to read {}: {}", dir.display(), err));
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(_) => continue,
            };
            if file_type.is_dir() {
                if should_skip_dir(&path) {
                    continue;
                }
                stack.push(path);
            } else if file_type.is_file() && is_lint_file(&path) {
                results.push(path);
            }
        }
    }
    results.sort();
    Ok(results)
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    matches!(name, "node_modules" | "target" | "dist" | ".git")
}

fn is_lint_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| LINT_FILE_EXTENSIONS.contains(&ext))
}

fn unique_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = BTreeSet::new();
    let mut output = Vec::new();
    for path in paths {
        let key = path.to_string_lossy().to_string();
        if seen.insert(key) {
            output.push(path);
        }
    }
    output
}

fn display_path(cwd: &Path, path: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
