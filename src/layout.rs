//! Resolves the fixed, project-root-relative file layout used by the binaries.

use std::io;
use std::path::{Path, PathBuf};

const SCRAPER_DIR_NAME: &str = "booking_scraper";
const WORK_DIR_NAME: &str = "work";
const CSV_DIR_NAME: &str = "csv_files";

const HOTELS_JSON_FILE: &str = "hotels.json";
const HOTEL_CSV_FILE: &str = "hotel_data.csv";
const WEATHER_CSV_FILE: &str = "weather_data.csv";

/// Where the scraper output and the generated CSV files live, relative to one project root.
///
/// ```
/// use trip_planner::ProjectLayout;
///
/// let layout = ProjectLayout::with_root("/data/trip");
/// assert!(layout.hotel_csv().ends_with("work/csv_files/hotel_data.csv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Uses the directory the crate was built from as the project root.
    pub fn new() -> Self {
        Self::with_root(env!("CARGO_MANIFEST_DIR"))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// JSON feed written by the booking scraper.
    pub fn hotels_json(&self) -> PathBuf {
        self.root.join(SCRAPER_DIR_NAME).join(HOTELS_JSON_FILE)
    }

    pub fn csv_dir(&self) -> PathBuf {
        self.root.join(WORK_DIR_NAME).join(CSV_DIR_NAME)
    }

    pub fn hotel_csv(&self) -> PathBuf {
        self.csv_dir().join(HOTEL_CSV_FILE)
    }

    pub fn weather_csv(&self) -> PathBuf {
        self.csv_dir().join(WEATHER_CSV_FILE)
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Makes sure the directory that will hold `file` exists.
///
/// Fails if the parent path exists but is not a directory.
pub(crate) fn ensure_parent_dir(file: &Path) -> io::Result<()> {
    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    match std::fs::metadata(parent) {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("Output path exists but is not a directory: {}", parent.display()),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("Creating output directory: {}", parent.display());
            std::fs::create_dir_all(parent)
        }
        Err(e) => Err(e),
    }
}
