//! Foundry VTT installs.
//! Discovers versions installed under `~/.iron`, checks timed download URLs,
//! launches an install and links a built project into Foundry's data directory.

use crate::constants::{FOUNDRY_RELEASES_URL, FOUNDRY_SHARED_DATA_DIR};
use crate::error::{Error, Result};
use crate::project::ProjectConfig;
use log::debug;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use url::Url;

/// A timed download URL that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedUrl {
    pub version: String,
    /// Unix timestamp after which the URL stops working
    pub expires: u64,
}

/// Lists the installed versions in `base`, oldest first.
///
/// Every directory except the shared `data` directory is an install. A
/// missing `base` means nothing is installed.
pub fn list_versions<P: AsRef<Path>>(base: P) -> Result<Vec<String>> {
    let base = base.as_ref();
    if !base.is_dir() {
        debug!("{} does not exist", base.display());
        return Ok(Vec::new());
    }
    let mut versions = Vec::new();
    for entry in std::fs::read_dir(base)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() && name != FOUNDRY_SHARED_DATA_DIR {
            versions.push(name);
        }
    }
    versions.sort_by(|a, b| compare_versions(a, b));
    Ok(versions)
}

/// Returns the newest of `versions`.
pub fn latest_version(versions: &[String]) -> Option<&String> {
    versions.iter().max_by(|a, b| compare_versions(a, b))
}

/// Orders versions by their dot-separated parts, numerically where both
/// parts are numbers, so `13.345` sorts after `9.280`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Checks a Foundry VTT timed download URL.
///
/// The URL must be https, point below the releases prefix and carry an
/// `Expires` timestamp later than `now`.
pub fn validate_timed_url(url: &str, now: u64) -> Result<TimedUrl> {
    let parsed =
        Url::parse(url).map_err(|e| Error::ValidationError(format!("invalid URL: {e}")))?;
    if parsed.scheme() != "https" || !url.starts_with(FOUNDRY_RELEASES_URL) {
        return Err(Error::ValidationError("not a Foundry VTT timed URL".to_string()));
    }

    let version = parsed
        .path_segments()
        .and_then(|mut segments| {
            segments.next().filter(|s| *s == "releases")?;
            segments.next().filter(|s| !s.is_empty())
        })
        .map(str::to_string)
        .ok_or_else(|| Error::ValidationError("timed URL has no release version".to_string()))?;

    let expires = parsed
        .query_pairs()
        .find(|(key, _)| key == "Expires")
        .and_then(|(_, value)| value.parse::<u64>().ok())
        .ok_or_else(|| Error::ValidationError("timed URL has no expiry".to_string()))?;
    if expires < now {
        return Err(Error::ValidationError("timed URL has expired".to_string()));
    }

    Ok(TimedUrl { version, expires })
}

/// Arguments Foundry VTT is started with.
pub fn launch_args<P: AsRef<Path>>(data_path: P, port: u16) -> Vec<String> {
    vec![
        format!("--dataPath={}", data_path.as_ref().display()),
        format!("--port={port}"),
    ]
}

/// Node entry point of an install. Newer Node builds keep `main.js` at the
/// root, older ones under `resources/app`.
pub fn entry_point<P: AsRef<Path>>(install_dir: P) -> PathBuf {
    let install_dir = install_dir.as_ref();
    let root_entry = install_dir.join("main.js");
    if root_entry.is_file() {
        root_entry
    } else {
        install_dir.join("resources").join("app").join("main.js")
    }
}

/// Runs the install in `install_dir` until it exits, sharing this terminal.
pub fn launch<P: AsRef<Path>, Q: AsRef<Path>>(
    install_dir: P,
    data_path: Q,
    port: u16,
) -> Result<()> {
    let entry = entry_point(&install_dir);
    if !entry.is_file() {
        return Err(Error::LaunchError(format!(
            "no Foundry VTT entry point in {}",
            install_dir.as_ref().display()
        )));
    }
    debug!("Starting node {}", entry.display());

    let status = Command::new("node")
        .arg(&entry)
        .args(launch_args(data_path, port))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::LaunchError(format!("failed to start node: {e}")))?;

    if !status.success() {
        return Err(Error::LaunchError(format!("Foundry VTT exited with status: {status}")));
    }
    Ok(())
}

/// Symlinks the build output of `config` into the Foundry data directory.
///
/// Returns the created link.
///
/// # Errors
/// * `Error::ValidationError` if something already exists at the link location
pub fn link(config: &ProjectConfig) -> Result<PathBuf> {
    let target = config.link_target();
    if target.symlink_metadata().is_ok() {
        return Err(Error::ValidationError(format!("{} already exists", target.display())));
    }
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let source = std::path::absolute(config.output_dir())?;
    debug!("Linking {} to {}", source.display(), target.display());
    symlink_dir(&source, &target)?;
    Ok(target)
}

#[cfg(unix)]
fn symlink_dir(source: &Path, target: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, target)
}

#[cfg(windows)]
fn symlink_dir(source: &Path, target: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(source, target)
}
