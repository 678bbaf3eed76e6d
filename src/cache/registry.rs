//! Cache Registry Module
//!
//! Owns every named map, creates them lazily on first write, and implements
//! the whole-map expiry sweep and the flat-file dump.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::cache::NamedCacheMap;
use crate::error::{CacheError, Result};

// == Cache Registry ==
/// Collection of [`NamedCacheMap`]s keyed by name.
///
/// A name is listed exactly as long as its map exists. Reads of unknown
/// names behave like reads of an empty map and never create anything.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    maps: BTreeMap<String, NamedCacheMap>,
}

impl CacheRegistry {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the named map, if it exists.
    pub fn map(&self, name: &str) -> Option<&NamedCacheMap> {
        self.maps.get(name)
    }

    fn map_or_create(&mut self, name: &str) -> Result<&mut NamedCacheMap> {
        if name.is_empty() {
            return Err(CacheError::empty("name"));
        }
        if !self.maps.contains_key(name) {
            debug!(name, "Creating named cache map");
        }
        Ok(self.maps.entry(name.to_string()).or_default())
    }

    // == Put ==
    /// Stores a value, creating the map on first write.
    pub fn put(&mut self, name: &str, key: String, value: String) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::empty("key"));
        }
        self.map_or_create(name)?.put(key, value);
        Ok(())
    }

    // == Get ==
    pub fn get(&self, name: &str, key: &str) -> Option<String> {
        self.maps.get(name)?.get(key).map(str::to_string)
    }

    // == Increment ==
    /// Adds `delta` to the integer under `key`, creating the map if needed.
    pub fn increment(&mut self, name: &str, key: &str, delta: &str) -> Result<String> {
        if key.is_empty() {
            return Err(CacheError::empty("key"));
        }
        Ok(self.map_or_create(name)?.increment(key, delta))
    }

    // == Delete ==
    pub fn delete(&mut self, name: &str, key: &str) -> bool {
        self.maps
            .get_mut(name)
            .is_some_and(|map| map.delete(key))
    }

    pub fn exists(&self, name: &str, key: &str) -> bool {
        self.maps.get(name).is_some_and(|map| map.exists(key))
    }

    /// Number of entries in the named map, 0 when it does not exist.
    pub fn size(&self, name: &str) -> usize {
        self.maps.get(name).map_or(0, NamedCacheMap::len)
    }

    /// Names of all live maps, sorted.
    pub fn names(&self) -> Vec<String> {
        self.maps.keys().cloned().collect()
    }

    /// Keys of the named map in traversal order.
    pub fn keys(&self, name: &str) -> Vec<String> {
        self.maps.get(name).map(NamedCacheMap::keys).unwrap_or_default()
    }

    /// Number of live maps.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    // == Clear ==
    /// Empties the named map.
    ///
    /// With `ttl_secs > 0` the map stays registered (it is created if it did
    /// not exist) and expires at `now + ttl_secs`. With `ttl_secs == 0` the
    /// map is removed from the registry entirely.
    pub fn clear(&mut self, name: &str, ttl_secs: u64, now: u64) -> Result<()> {
        if ttl_secs == 0 {
            if self.maps.remove(name).is_some() {
                debug!(name, "Removed named cache map");
            }
            return Ok(());
        }

        let map = self.map_or_create(name)?;
        map.clear();
        map.set_expire_at(Some(now.saturating_add(ttl_secs)));
        debug!(name, ttl_secs, "Cleared named cache map with expiry");
        Ok(())
    }

    // == Sweep ==
    /// Clears every map whose expiry has been reached and unsets that expiry.
    ///
    /// Maps stay registered; only `clear` with a zero TTL removes a name.
    /// Returns the number of maps cleared.
    pub fn sweep(&mut self, now: u64) -> usize {
        let mut cleared = 0;
        for (name, map) in self.maps.iter_mut() {
            if map.is_expired_at(now) {
                debug!(name = %name, entries = map.len(), "Named cache map expired");
                map.clear();
                map.set_expire_at(None);
                cleared += 1;
            }
        }
        cleared
    }

    // == Iteration ==
    /// Starts a traversal of the named map. Returns false if it does not exist.
    pub fn begin_iteration(&mut self, name: &str) -> bool {
        match self.maps.get_mut(name) {
            Some(map) => {
                map.begin_iteration();
                true
            }
            None => false,
        }
    }

    /// Produces the next entry of the named map's traversal.
    pub fn next_entry(&mut self, name: &str) -> Option<(String, String)> {
        self.maps.get_mut(name)?.next_entry()
    }

    /// Whether the named map's traversal has entries left.
    pub fn has_next(&self, name: &str) -> bool {
        self.maps.get(name).is_some_and(NamedCacheMap::has_next)
    }

    /// Calls `f` for every entry of the named map, returning how many were visited.
    pub fn for_each<F>(&self, name: &str, mut f: F) -> usize
    where
        F: FnMut(&str, &str),
    {
        let Some(map) = self.maps.get(name) else {
            return 0;
        };
        map.iter().fold(0, |count, (key, value)| {
            f(key, value);
            count + 1
        })
    }

    // == Dump ==
    /// Writes the named map to `path`, one `key<separator>value` line per entry.
    ///
    /// The file is created (or truncated) before anything else, so a missing
    /// map produces an empty file. Nothing is escaped: keys or values that
    /// contain the separator or a newline produce an ambiguous dump.
    ///
    /// Returns the number of records written.
    pub fn dump(&self, name: &str, path: impl AsRef<Path>, separator: &str) -> Result<usize> {
        let path = path.as_ref();
        let dump_error = |source: io::Error| CacheError::Dump {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(dump_error)?;
        let mut writer = BufWriter::new(file);
        let mut written = 0;

        if let Some(map) = self.maps.get(name) {
            for (key, value) in map.iter() {
                writeln!(writer, "{}{}{}", key, separator, value).map_err(dump_error)?;
                written += 1;
            }
        }
        writer.flush().map_err(dump_error)?;

        info!(name, path = %path.display(), records = written, "Dumped named cache map");
        Ok(written)
    }
}
