//! Helpers shared by `build.rs` and the crate tests.
//!
//! `build.rs` pulls this file in with `#[path]`; the library includes it only
//! under `cfg(test)`.

use std::path::{Path, PathBuf};
use std::vec::Vec;

/// Every `.env` location dotenvy may load, nearest first.
///
/// All of them are watched, including ones that do not exist yet, so creating
/// a `.env` after the first build still reruns the build script.
pub fn dotenv_candidates(start: &Path) -> Vec<PathBuf> {
    start.ancestors().map(|dir| dir.join(".env")).collect()
}

/// Value to forward with `cargo:rustc-env`; blank values keep the default.
pub fn forwarded_value(raw: &str) -> Option<&str> {
    let value = raw.trim();
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_cover_crate_and_workspace_root() {
        let candidates = dotenv_candidates(Path::new("/work/pokeball/crates/pokeball-core"));

        assert_eq!(
            candidates.first().map(PathBuf::as_path),
            Some(Path::new("/work/pokeball/crates/pokeball-core/.env"))
        );
        assert!(candidates.contains(&PathBuf::from("/work/pokeball/.env")));
        assert_eq!(candidates.last().map(PathBuf::as_path), Some(Path::new("/.env")));
        assert_eq!(candidates.len(), 5);
    }

    #[test]
    fn test_forwarded_value_trims_and_skips_blank() {
        assert_eq!(forwarded_value("  24:6F:28:00:11:22\n"), Some("24:6F:28:00:11:22"));
        assert_eq!(forwarded_value("6"), Some("6"));
        assert_eq!(forwarded_value("   "), None);
        assert_eq!(forwarded_value(""), None);
    }
}
