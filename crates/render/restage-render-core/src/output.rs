//! Versioned output directory allocation.
//!
//! Layout: `<base>/<DD_MM_YYYY>/[<prefix>/]render_<N>` where N is the
//! smallest positive integer whose directory did not yet exist. Every
//! session gets a directory nobody has written to before; nothing under it
//! is ever reused or overwritten.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// A civil calendar date, used only to name the per-day output folder.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    /// Today's UTC date from the system clock.
    pub fn today() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Self::from_unix_days(secs.div_euclid(86_400))
    }

    /// Convert days since 1970-01-01 to a civil date (Euclidean affine
    /// transformation between day counts and Gregorian triples).
    fn from_unix_days(days: i64) -> Self {
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let y = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
        Self {
            year: (if m <= 2 { y + 1 } else { y }) as i32,
            month: m,
            day: d,
        }
    }

    /// Folder name in `DD_MM_YYYY` form.
    pub fn folder_name(&self) -> String {
        format!("{:02}_{:02}_{:04}", self.day, self.month, self.year)
    }
}

/// Allocator for the session output directory tree.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    base: PathBuf,
    prefix: Option<String>,
    date: Date,
}

impl OutputLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            prefix: None,
            date: Date::today(),
        }
    }

    /// Insert a prefix folder between the date and the render folder. An
    /// empty prefix means none.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = if prefix.is_empty() {
            None
        } else {
            Some(prefix)
        };
        self
    }

    /// Override the date folder (tests pin this for determinism).
    pub fn with_date(mut self, date: Date) -> Self {
        self.date = date;
        self
    }

    /// The parent under which `render_<N>` folders are allocated.
    pub fn session_parent(&self) -> PathBuf {
        let mut dir = self.base.join(self.date.folder_name());
        if let Some(prefix) = &self.prefix {
            dir.push(prefix);
        }
        dir
    }

    /// Create and return the first `render_<N>` directory that did not yet
    /// exist, N counting up from 1.
    ///
    /// The create is atomic (create-if-absent), so two sessions racing on
    /// the same parent cannot both claim one N: the loser sees
    /// `AlreadyExists` and moves on to the next number.
    pub fn allocate(&self) -> Result<PathBuf, RenderError> {
        let parent = self.session_parent();
        fs::create_dir_all(&parent)?;

        for n in 1u32.. {
            let candidate = parent.join(format!("render_{n}"));
            match fs::create_dir(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(RenderError::OutputAllocation {
            reason: format!("render numbers exhausted under {}", parent.display()),
        })
    }
}

/// Per-camera subdirectory inside an allocated session directory.
pub(crate) fn camera_dir(session_dir: &Path, camera_name: &str) -> PathBuf {
    session_dir.join(camera_name)
}
