// Pure helpers for describing files: which Content-Type to upload them
// with, and how to print a byte count.

const KB: u64 = 1024;
const MB: u64 = KB * KB;

/// Content type for a path relative to the site root.
///
/// Source maps (`.js.map`, `.css.map`) are JSON; everything else goes
/// through the extension table and may be unknown.
pub fn content_type(path: &str) -> Option<&'static str> {
    if path.ends_with(".js.map") || path.ends_with(".css.map") {
        return Some("application/json");
    }
    mime_guess::from_path(path).first_raw()
}

/// Human readable size: `512B`, `2.0KB`, `5.0MB`.
pub fn fmt_size(num: u64) -> String {
    if num < KB {
        format!("{num}B")
    } else if num < MB {
        format!("{:.1}KB", num as f64 / KB as f64)
    } else {
        format!("{:.1}MB", num as f64 / MB as f64)
    }
}
