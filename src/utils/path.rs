//! Path helpers

use std::path::{Path, PathBuf};

/// Expand a leading `~` or `~/` to the user's home directory
///
/// Paths without a tilde prefix pass through unchanged, as does everything
/// when no home directory can be determined.
pub fn expand_user(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };

    if s == "~" {
        return dirs::home_dir().unwrap_or_else(|| path.to_path_buf());
    }

    if let Some(rest) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_passes_through() {
        assert_eq!(
            expand_user(Path::new("/tmp/downloads")),
            PathBuf::from("/tmp/downloads")
        );
    }

    #[test]
    fn test_relative_path_passes_through() {
        assert_eq!(
            expand_user(Path::new("./downloads")),
            PathBuf::from("./downloads")
        );
    }

    #[test]
    fn test_tilde_prefix_expands() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_user(Path::new("~/Music")), home.join("Music"));
            assert_eq!(expand_user(Path::new("~")), home);
        }
    }

    #[test]
    fn test_tilde_in_the_middle_is_not_expanded() {
        assert_eq!(
            expand_user(Path::new("/data/~cache")),
            PathBuf::from("/data/~cache")
        );
    }
}
