use crate::config::types::SeedFile;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and validates a seed file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML seed file
///
/// # Returns
///
/// * `Ok(SeedFile)` - Successfully loaded and validated seeds
/// * `Err(ConfigError)` - Failed to read, parse, or validate the file
pub fn load_seeds(path: &Path) -> ConfigResult<SeedFile> {
    let content = std::fs::read_to_string(path)?;
    parse_seeds(&content)
}

/// Parses and validates seed file content
pub fn parse_seeds(content: &str) -> ConfigResult<SeedFile> {
    let file: SeedFile = toml::from_str(content)?;
    validate(&file)?;
    Ok(file)
}

/// Computes a SHA-256 hash of the seed file content
///
/// Logged at startup so a manifest can be traced back to the seed list that
/// produced it.
pub fn compute_seed_file_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&content)))
}

/// Loads a seed file and returns both the seeds and the file hash
pub fn load_seeds_with_hash(path: &Path) -> ConfigResult<(SeedFile, String)> {
    let file = load_seeds(path)?;
    let hash = compute_seed_file_hash(path)?;
    Ok((file, hash))
}
