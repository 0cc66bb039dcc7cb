mod common;

use common::project;
use iron::error::Error;
use iron::foundry::{entry_point, latest_version, link, list_versions, validate_timed_url};
use iron::project::ProjectType;
use std::fs;
use tempfile::TempDir;

const NOW: u64 = 1_700_000_000;

#[test]
fn test_list_versions_skips_data_and_files() {
    let temp_dir = TempDir::new().unwrap();
    for dir in ["12.331", "data", "9.280", "13.345"] {
        fs::create_dir(temp_dir.path().join(dir)).unwrap();
    }
    fs::write(temp_dir.path().join("README"), "").unwrap();

    let versions = list_versions(temp_dir.path()).unwrap();
    assert_eq!(versions, vec!["9.280", "12.331", "13.345"]);
    assert_eq!(latest_version(&versions).map(String::as_str), Some("13.345"));
}

#[test]
fn test_list_versions_without_base() {
    let temp_dir = TempDir::new().unwrap();
    let versions = list_versions(temp_dir.path().join(".iron")).unwrap();
    assert!(versions.is_empty());
    assert_eq!(latest_version(&versions), None);
}

#[test]
fn test_valid_timed_url() {
    let url = format!(
        "https://foundryvtt.s3.amazonaws.com/releases/13.345/FoundryVTT-Node-13.345.zip?AWSAccessKeyId=X&Signature=Y&Expires={}",
        NOW + 300
    );
    let timed = validate_timed_url(&url, NOW).unwrap();
    assert_eq!(timed.version, "13.345");
    assert_eq!(timed.expires, NOW + 300);
}

#[test]
fn test_invalid_timed_urls() {
    let expired = format!(
        "https://foundryvtt.s3.amazonaws.com/releases/13.345/FoundryVTT-13.345.zip?Expires={}",
        NOW - 1
    );
    let cases = [
        "",
        "not a url",
        "http://foundryvtt.s3.amazonaws.com/releases/13.345/FoundryVTT.zip?Expires=9999999999",
        "https://example.com/releases/13.345/FoundryVTT.zip?Expires=9999999999",
        "https://foundryvtt.s3.amazonaws.com/releases/13.345/FoundryVTT.zip",
        expired.as_str(),
    ];
    for url in cases {
        let result = validate_timed_url(url, NOW);
        assert!(matches!(result, Err(Error::ValidationError(_))), "accepted {url:?}");
    }
}

#[test]
fn test_entry_point_layouts() {
    let temp_dir = TempDir::new().unwrap();
    let legacy = temp_dir.path().join("legacy");
    assert_eq!(entry_point(&legacy), legacy.join("resources/app/main.js"));

    let node = temp_dir.path().join("node");
    fs::create_dir(&node).unwrap();
    fs::write(node.join("main.js"), "").unwrap();
    assert_eq!(entry_point(&node), node.join("main.js"));
}

#[cfg(unix)]
#[test]
fn test_link_build_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = project(temp_dir.path(), ProjectType::System, "mysys");
    fs::create_dir(temp_dir.path().join("dist")).unwrap();

    let target = link(&config).unwrap();

    assert_eq!(target, temp_dir.path().join("foundry-data/Data/systems/mysys"));
    assert_eq!(fs::read_link(&target).unwrap(), temp_dir.path().join("dist"));

    let err = link(&config).unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
}
