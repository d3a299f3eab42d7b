//! Text layout loader.
//!
//! One line per row, using the legend of [`GridMap::from_rows`]. Trailing
//! blank lines are ignored.

use std::path::Path;

use crate::env::GridMap;
use crate::loaders::{LoadResult, read_file};

pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<GridMap> {
        let content = read_file(path)?;
        let mut rows: Vec<&str> = content.lines().collect();
        while rows.last().is_some_and(|row| row.trim().is_empty()) {
            rows.pop();
        }
        GridMap::from_rows(&rows).map_err(|e| {
            anyhow::anyhow!("Failed to parse map layout {}: {}", path.display(), e)
        })
    }
}
