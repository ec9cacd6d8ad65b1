//! # Favorites Store
//!
//! Persistent set of favorited restaurants, keyed by restaurant id.
//!
//! Stored as a single JSON file (`~/.gourmet/favorites.json` by default):
//!
//! ```text
//! { "favorites": [ { "id": "...", "name": "...", ... }, ... ] }
//! ```
//!
//! Every mutation is one transaction: the next state is written to a `.tmp`
//! file and renamed over the target, and the in-memory map is only swapped
//! once that succeeds.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::api::Restaurant;

/// Snapshot of a restaurant taken when it was favorited.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub id: String,
    pub name: String,
    pub logo_image_url: String,
    pub coupon_url: String,
    /// Unix seconds.
    pub added_at: i64,
}

impl FavoriteEntry {
    pub fn snapshot(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id.clone(),
            name: restaurant.name.clone(),
            logo_image_url: restaurant.logo_image_url.clone(),
            coupon_url: restaurant.coupon_url().to_string(),
            added_at: Utc::now().timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    DuplicateKey(String),
    NotFound(String),
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateKey(id) => write!(f, "favorite already exists: {id}"),
            StoreError::NotFound(id) => write!(f, "favorite not found: {id}"),
            StoreError::Io(e) => write!(f, "favorites I/O error: {e}"),
            StoreError::Serialization(e) => write!(f, "favorites format error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Serialize, Deserialize, Default)]
struct FavoritesFile {
    favorites: Vec<FavoriteEntry>,
}

pub struct FavoritesStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, FavoriteEntry>,
}

impl FavoritesStore {
    /// Opens the store at `path`, loading existing entries if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut entries = BTreeMap::new();

        if path.exists() {
            let json = fs::read_to_string(&path).map_err(StoreError::Io)?;
            let file: FavoritesFile =
                serde_json::from_str(&json).map_err(StoreError::Serialization)?;
            for entry in file.favorites {
                entries.insert(entry.id.clone(), entry);
            }
            info!("Loaded {} favorites from {}", entries.len(), path.display());
        } else {
            debug!("No favorites file at {}, starting empty", path.display());
        }

        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&FavoriteEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, most recently added first.
    pub fn entries(&self) -> Vec<&FavoriteEntry> {
        let mut list: Vec<&FavoriteEntry> = self.entries.values().collect();
        list.sort_by(|a, b| b.added_at.cmp(&a.added_at).then_with(|| a.id.cmp(&b.id)));
        list
    }

    pub fn add(&mut self, entry: FavoriteEntry) -> Result<(), StoreError> {
        if self.is_favorite(&entry.id) {
            return Err(StoreError::DuplicateKey(entry.id));
        }
        let mut next = self.entries.clone();
        next.insert(entry.id.clone(), entry);
        self.commit(next)
    }

    pub fn remove(&mut self, id: &str) -> Result<FavoriteEntry, StoreError> {
        let mut next = self.entries.clone();
        let removed = next
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.commit(next)?;
        Ok(removed)
    }

    /// Flips membership for `restaurant`. Returns `true` if it is now a favorite.
    pub fn toggle(&mut self, restaurant: &Restaurant) -> Result<bool, StoreError> {
        if self.is_favorite(&restaurant.id) {
            self.remove(&restaurant.id)?;
            Ok(false)
        } else {
            self.add(FavoriteEntry::snapshot(restaurant))?;
            Ok(true)
        }
    }

    fn commit(&mut self, next: BTreeMap<String, FavoriteEntry>) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            let file = FavoritesFile {
                favorites: next.values().cloned().collect(),
            };
            atomic_write_json(path, &file)?;
        }
        self.entries = next;
        Ok(())
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(StoreError::Io)?;
    }
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data).map_err(StoreError::Serialization)?;
    fs::write(&tmp_path, json).map_err(StoreError::Io)?;
    fs::rename(&tmp_path, path).map_err(StoreError::Io)?;
    Ok(())
}
