//! Minimal env-file editing for the sync tool.

use std::io;
use std::path::Path;

use regex::{NoExpand, Regex};

/// Replace the `KEY=...` line in the env file, or append one. Creates the
/// file when missing.
pub fn set_var(path: &Path, key: &str, value: &str) -> io::Result<()> {
    let current = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    let line = format!("{key}={value}");
    let re = Regex::new(&format!(r"(?m)^{}=.*$", regex::escape(key)))
        .expect("static env key pattern");
    let next = if re.is_match(&current) {
        re.replace(&current, NoExpand(&line)).into_owned()
    } else if current.is_empty() {
        format!("{line}\n")
    } else {
        let sep = if current.ends_with('\n') { "" } else { "\n" };
        format!("{current}{sep}{line}\n")
    };
    std::fs::write(path, next)
}

/// Copy a sibling `.env.example` to the env file if the env file doesn't
/// exist yet. Returns whether a seed happened.
pub fn seed_from_example(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let example = path.with_file_name(".env.example");
    if !example.exists() {
        return Ok(false);
    }
    std::fs::copy(&example, path)?;
    Ok(true)
}
