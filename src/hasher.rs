//! This module contains functions for hashing the documentation input
//! trees and checking if they have changed since the last doxygen run.

use crate::utils::log::{log, LogLevel};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use rayon::prelude::*;
use sha1::{Digest, Sha1};
use std::cmp::min;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use walkdir::WalkDir;

const CHUNK_SIZE: usize = 1024 * 1024; // 1MB: read files in chunks for efficiency

pub struct Hasher;

impl Hasher {
    /// Hashes a file and returns the hash as a string.
    fn hash_file(path: &str) -> Option<String> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(_) => {
                log(LogLevel::Warn, &format!("Failed to open file '{}'", path));
                return None;
            }
        };

        let mut limit = match file.metadata() {
            Ok(metadata) => metadata.len(),
            Err(why) => {
                log(LogLevel::Error, &format!("Failed to get length for file: {}", path));
                log(LogLevel::Error, &format!("Error: {}", why));
                return None;
            }
        };

        let mut buffer = [0; CHUNK_SIZE];
        let mut hasher = Sha1::new();

        while limit > 0 {
            let read_size = min(limit as usize, CHUNK_SIZE);
            match file.read(&mut buffer[0..read_size]) {
                Ok(read) if read > 0 => {
                    hasher.update(&buffer[0..read]);
                    limit -= read as u64;
                }
                _ => break,
            }
        }

        Some(hasher.finalize().iter().map(|byte| format!("{:02x}", byte)).collect())
    }

    /// Collects every regular file under the given directories.
    /// Directories that do not exist are skipped with a warning.
    pub fn collect_files(dirs: &[String]) -> Vec<String> {
        let mut files = Vec::new();
        for dir in dirs {
            if !Path::new(dir).exists() {
                log(LogLevel::Warn, &format!("Input directory does not exist: {}", dir));
                continue;
            }
            for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.is_file() {
                    if let Some(file_path_str) = path.to_str() {
                        #[cfg(target_os = "windows")]
                        let formatted_path_str = file_path_str.replace('\\', "/");
                        #[cfg(not(target_os = "windows"))]
                        let formatted_path_str = file_path_str.to_string();
                        files.push(formatted_path_str);
                    }
                }
            }
        }
        let mut files: Vec<String> = files.into_iter().unique().collect();
        files.sort_unstable();
        files
    }

    /// Hashes the given files in parallel and returns a path to hash map.
    /// Unreadable files are dropped from the map, which makes them count
    /// as changed on the next comparison.
    pub fn hash_files(files: &[String]) -> HashMap<String, String> {
        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("[{bar:40}] {pos}/{len} files")
                .unwrap()
                .progress_chars("=> "),
        );
        let path_hash: HashMap<String, String> = files
            .par_iter()
            .filter_map(|path| {
                let hash = Hasher::hash_file(path);
                progress.inc(1);
                hash.map(|hash| (path.clone(), hash))
            })
            .collect();
        progress.finish_and_clear();
        path_hash
    }

    /// Loads the hashes from a file and returns them as a hashmap.
    /// # Arguments
    /// * `path` - The path of the file to load the hashes from.
    pub fn load_hashes_from_file(path: &str) -> HashMap<String, String> {
        let mut path_hash: HashMap<String, String> = HashMap::new();
        let path = Path::new(path);
        if !path.exists() {
            return path_hash;
        }
        let mut file = match OpenOptions::new().read(true).open(path) {
            Ok(file) => file,
            Err(_) => {
                log(
                    LogLevel::Warn,
                    &format!("Failed to open hash file '{}'", path.display()),
                );
                return path_hash;
            }
        };
        let mut contents = String::new();
        if file.read_to_string(&mut contents).is_err() {
            return path_hash;
        }
        for line in contents.lines() {
            let mut split = line.split(' ');
            if let (Some(path), Some(hash)) = (split.next(), split.next()) {
                if !path.is_empty() && !hash.is_empty() {
                    path_hash.insert(path.to_string(), hash.to_string());
                }
            }
        }
        path_hash
    }

    /// Saves the hashes to a file.
    /// # Arguments
    /// * `path` - The path of the file to save the hashes to.
    /// * `path_hash` - The hashmap of paths and hashes.
    pub fn save_hashes_to_file(path: &str, path_hash: &HashMap<String, String>) {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .unwrap_or_else(|_| {
                log(LogLevel::Error, &format!("Failed to open file: {}", path));
                std::process::exit(1);
            });
        for (path, hash) in path_hash {
            let line = format!("{} {}\n", path, hash);
            file.write_all(line.as_bytes()).unwrap_or_else(|why| {
                log(LogLevel::Error, &format!("Failed to write hash file: {}", why));
                std::process::exit(1);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_tree(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lwbuild_hasher_{}_{}", std::process::id(), name));
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("a.h"), "struct A;").unwrap();
        fs::write(dir.join("sub/b.h"), "struct B;").unwrap();
        dir
    }

    #[test]
    fn collects_files_recursively() {
        let dir = temp_tree("collect");
        let files = Hasher::collect_files(&[dir.to_str().unwrap().to_string()]);
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("a.h")));
        assert!(files.iter().any(|f| f.ends_with("b.h")));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_skipped() {
        let files = Hasher::collect_files(&["/nonexistent/lwbuild/input".to_string()]);
        assert!(files.is_empty());
    }

    #[test]
    fn hash_map_round_trips_through_file() {
        let dir = temp_tree("roundtrip");
        let files = Hasher::collect_files(&[dir.to_str().unwrap().to_string()]);
        let path_hash = Hasher::hash_files(&files);
        assert_eq!(path_hash.len(), 2);

        let hash_file = dir.join("doxygen.hash");
        Hasher::save_hashes_to_file(hash_file.to_str().unwrap(), &path_hash);
        let loaded = Hasher::load_hashes_from_file(hash_file.to_str().unwrap());
        assert_eq!(loaded, path_hash);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn changed_file_changes_the_map() {
        let dir = temp_tree("changed");
        let files = Hasher::collect_files(&[dir.to_str().unwrap().to_string()]);
        let before = Hasher::hash_files(&files);
        fs::write(dir.join("a.h"), "struct A; struct C;").unwrap();
        let after = Hasher::hash_files(&files);
        assert_ne!(before, after);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_hash_file_loads_empty() {
        let loaded = Hasher::load_hashes_from_file("/nonexistent/lwbuild.hash");
        assert!(loaded.is_empty());
    }
}
