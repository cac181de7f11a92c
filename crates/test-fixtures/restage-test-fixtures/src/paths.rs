//! Unique temporary output roots for directory-allocation tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// A process-unique directory path under the system temp dir. The path is
/// not created; callers that need it existing create it themselves.
pub fn temp_output_root(tag: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!(
        "restage_{tag}_{}_{nanos}_{n}",
        std::process::id()
    ))
}
