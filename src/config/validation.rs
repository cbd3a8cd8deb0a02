use crate::config::types::{Seed, SeedFile, UserAgentConfig};
use crate::{ConfigError, ConfigResult};
use std::collections::HashSet;
use url::Url;

/// Validates the entire seed file
pub fn validate(file: &SeedFile) -> ConfigResult<()> {
    validate_user_agent_config(&file.user_agent)?;

    if file.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "seed file must define at least one seed".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for seed in &file.seeds {
        validate_seed(seed)?;
        if !names.insert(seed.name.as_str()) {
            return Err(ConfigError::DuplicateSeed(seed.name.clone()));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.contact.trim().is_empty() {
        return Err(ConfigError::Validation("contact cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates one seed entry
fn validate_seed(seed: &Seed) -> ConfigResult<()> {
    validate_seed_name(&seed.name)?;

    if seed.start_urls.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Seed '{}' must have at least one start URL",
            seed.name
        )));
    }

    for start in &seed.start_urls {
        let url = Url::parse(start).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", start, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Start URL '{}' must use http or https",
                start
            )));
        }
    }

    if seed.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Seed '{}' must allow at least one domain",
            seed.name
        )));
    }

    for domain in &seed.allowed_domains {
        validate_domain_string(domain)?;
    }

    Ok(())
}

/// Seed names become directory names under the output root
fn validate_seed_name(name: &str) -> ConfigResult<()> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "Seed name cannot be empty".to_string(),
        ));
    }

    if name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "Seed name '{}' is not a usable directory name",
            name
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(ConfigError::Validation(format!(
            "Seed name '{}' may only contain ASCII letters, digits, '.', '_' and '-'",
            name
        )));
    }

    Ok(())
}

/// Validates an allowed domain suffix (no wildcard syntax)
fn validate_domain_string(domain: &str) -> ConfigResult<()> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    Ok(())
}
