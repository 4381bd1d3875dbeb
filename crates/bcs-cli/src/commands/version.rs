//! `bcs version` command implementation

/// Crate version baked in at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git revision, when the build sets `BCS_GIT_COMMIT`
pub const REVISION: Option<&str> = option_env!("BCS_GIT_COMMIT");

/// Version line printed by `bcs version` and `bcs -v`
pub fn version_string() -> String {
    match REVISION.filter(|rev| !rev.is_empty()) {
        Some(rev) => format!("bcs v{VERSION} ({rev})"),
        None => format!("bcs v{VERSION}"),
    }
}

/// Print version information
pub fn run() {
    println!("{}", version_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        let version = version_string();
        assert!(version.starts_with(&format!("bcs v{}", env!("CARGO_PKG_VERSION"))));
    }
}
