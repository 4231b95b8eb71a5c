use std::path::Path;

use anyhow::Result;
use tokio::fs;

/// Creates the directory that will hold `path`, if it has one.
pub async fn ensure_parent_dir(path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

pub fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_keeps_absolute_and_joins_relative() {
        let base = Path::new("/etc/giftdesk");
        assert_eq!(resolve_path(base, "/var/state.json"), "/var/state.json");
        assert_eq!(resolve_path(base, " state.json "), "/etc/giftdesk/state.json");
        assert_eq!(resolve_path(base, "  "), "");
    }
}
