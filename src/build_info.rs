//! Build and engine identity, shown by the CLI banner and `status`.

use serde::Serialize;

/// What this binary was built from and which SQLite it links
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Set by `build.rs`; absent when built without it
    pub build: Option<u64>,
    pub built_at: Option<&'static str>,
    pub sqlite: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build: option_env!("WORDSTORE_BUILD_NUMBER").and_then(|n| n.parse().ok()),
            built_at: option_env!("WORDSTORE_BUILD_TIMESTAMP"),
            sqlite: rusqlite::version(),
        }
    }
}

/// One-line banner on stderr so stdout stays clean for command output
pub fn print_startup_banner(target: &str) {
    let info = BuildInfo::current();
    let build = info
        .build
        .map(|n| format!(" build {}", n))
        .unwrap_or_default();
    eprintln!(
        "wordstore {}{} (SQLite {}) -> {}",
        info.version, build, info.sqlite, target
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_linked_sqlite() {
        let info = BuildInfo::current();
        assert_eq!(info.sqlite, rusqlite::version());
        assert!(info.sqlite.starts_with('3'));
    }

    #[test]
    fn test_serializes_for_status() {
        let json = serde_json::to_value(BuildInfo::current()).unwrap();
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert!(json["sqlite"].is_string());
    }
}
