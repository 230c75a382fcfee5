//! Small helpers for text shaping and file system checks.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Collapse runs of whitespace (including newlines from DOM text nodes)
/// into single spaces and trim the ends.
pub fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !last_space && !out.is_empty() {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out.trim_end().to_string()
}

/// Clip a description to `max` characters, appending an ellipsis when text
/// was dropped. Operates on character boundaries, so multi-byte translated
/// text is safe.
pub fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    // back off to a char boundary so multi-byte input cannot panic the slice
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_ws() {
        assert_eq!(collapse_ws("a  b\n\tc"), "a b c");
        assert_eq!(collapse_ws("  leading and trailing  "), "leading and trailing");
        assert_eq!(collapse_ws(""), "");
    }

    #[test]
    fn test_clip_short_string_untouched() {
        assert_eq!(clip("short", 300), "short");
    }

    #[test]
    fn test_clip_appends_ellipsis() {
        let long = "x".repeat(400);
        let clipped = clip(&long, 300);
        assert_eq!(clipped.chars().count(), 303);
        assert!(clipped.ends_with("..."));
    }

    #[test]
    fn test_clip_multibyte_safe() {
        let jp = "機能".repeat(200);
        let clipped = clip(&jp, 300);
        assert!(clipped.ends_with("..."));
        assert_eq!(clipped.chars().count(), 303);
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte_boundary() {
        // 3-byte chars; a cut at 100 bytes lands mid-char and must back off
        let jp = "日".repeat(50);
        let result = truncate_for_log(&jp, 100);
        assert!(result.starts_with(&"日".repeat(33)));
        assert!(result.contains("(+51 bytes)"));
    }
}
