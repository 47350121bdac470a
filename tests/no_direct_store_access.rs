// tests/no_direct_store_access.rs
// Fails if SQLite calls appear outside the repository module.
// Allowed: the SQLite repository and the store error type wrapping rusqlite errors.

use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.is_dir() {
                collect_rs_files(&p, files);
            } else if p.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(p);
            }
        }
    }
}

fn is_whitelisted(path: &Path) -> bool {
    let p = path.to_string_lossy();
    p.contains("/auth/sqlite.rs") || p.contains("\\auth\\sqlite.rs") ||
    p.contains("/auth/error.rs") || p.contains("\\auth\\error.rs")
}

#[test]
fn no_direct_store_access_outside_repository() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let src_dir = Path::new(manifest_dir).join("src");

    let mut files = Vec::new();
    collect_rs_files(&src_dir, &mut files);
    assert!(!files.is_empty(), "no sources found under {:?}", src_dir);

    // Patterns indicating direct store access via rusqlite
    let bad_patterns = [
        "rusqlite::",
        "Connection::open",
        ".execute(",
        ".execute_batch(",
        ".query_row(",
        ".prepare(",
    ];

    let mut offenders: Vec<(String, String)> = Vec::new();

    for file in files {
        if is_whitelisted(&file) { continue; }
        let content = match fs::read_to_string(&file) {
            Ok(c) => c,
            Err(_) => continue,
        };

        for pat in &bad_patterns {
            if content.contains(pat) {
                offenders.push((file.to_string_lossy().to_string(), pat.to_string()));
            }
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::from("Direct store calls found outside the repository:\n");
        for (file, pat) in offenders {
            msg.push_str(&format!("  {} contains pattern '{}': go through UserRepository instead\n", file, pat));
        }
        panic!("{}", msg);
    }
}
