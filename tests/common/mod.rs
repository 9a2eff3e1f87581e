use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fresh site directory under the system temp dir, with `public/` created when asked.
///
/// The path is canonical so it matches what the binary reports from `current_dir()`.
pub fn scratch_site(name: &str, with_public: bool) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "grain-texture-{name}-{}-{nanos}",
        std::process::id()
    ));
    if with_public {
        fs::create_dir_all(dir.join("public")).unwrap();
    } else {
        fs::create_dir_all(&dir).unwrap();
    }
    fs::canonicalize(&dir).unwrap()
}
