//! Structural tests for layer boundary enforcement.
//!
//! These scan the source tree so a stray import between layers fails the
//! build's test run instead of slipping through review.

use std::path::{Path, PathBuf};

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

fn relative(file: &Path) -> String {
    file.strip_prefix(env!("CARGO_MANIFEST_DIR"))
        .unwrap_or(file)
        .display()
        .to_string()
        .replace('\\', "/")
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().starts_with("#[cfg(") && line.contains("test") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-comment production lines of every file under `dir`, as
/// `(relative path, line number, line)`.
fn production_lines(dir: &Path) -> Vec<(String, usize, String)> {
    let mut out = Vec::new();
    for file in collect_rs_files(dir) {
        // `test_support.rs` is only compiled under #[cfg(test)].
        if file.ends_with("test_support.rs") || file.ends_with("tests.rs") {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let rel = relative(&file);
        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") || trimmed.starts_with("/*") {
                continue;
            }
            out.push((rel.clone(), i + 1, line.to_string()));
        }
    }
    out
}

fn assert_no_match(dir: &Path, forbidden: &[&str], rule: &str) {
    let violations: Vec<String> = production_lines(dir)
        .into_iter()
        .filter(|(_, _, line)| forbidden.iter().any(|f| line.contains(f)))
        .map(|(rel, n, line)| format!("{rel}:{n}: {}", line.trim()))
        .collect();
    assert!(
        violations.is_empty(),
        "{rule}:\n{}",
        violations.join("\n")
    );
}

#[test]
fn domain_is_pure() {
    assert_no_match(
        &src_dir().join("domain"),
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "tokio::",
            "std::fs",
            "std::process",
        ],
        "domain/ must not perform I/O or depend on outer layers",
    );
}

#[test]
fn application_depends_only_on_domain_and_ports() {
    assert_no_match(
        &src_dir().join("application"),
        &["crate::infra", "crate::commands", "crate::output", "std::fs::"],
        "application/ must reach the host only through ports",
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    assert_no_match(
        &src_dir().join("infra"),
        &["crate::commands", "crate::output"],
        "infra/ must not import from commands/ or output/",
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    assert_no_match(
        &src_dir().join("infra"),
        &["println!", "eprintln!"],
        "infra/ logs through tracing, never println!/eprintln!",
    );
}

#[test]
fn no_concrete_adapters_in_service_signatures() {
    let concrete = [
        "TokioCommandRunner",
        "AptPackageManager",
        "SystemctlServiceManager",
        "PipRuntimeManager",
        "StateManager",
        "HostFs",
    ];
    let violations: Vec<String> = production_lines(&src_dir().join("application").join("services"))
        .into_iter()
        .filter(|(_, _, line)| line.contains("fn ") && concrete.iter().any(|c| line.contains(c)))
        .map(|(rel, n, line)| format!("{rel}:{n}: {}", line.trim()))
        .collect();
    assert!(
        violations.is_empty(),
        "services must take trait bounds, not concrete adapters:\n{}",
        violations.join("\n")
    );
}

#[test]
fn commands_render_through_renderer() {
    assert_no_match(
        &src_dir().join("commands"),
        &["json: bool", "if json", "if !json", "serde_json::"],
        "commands/ must render through app.renderer()",
    );
}
