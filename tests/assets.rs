use std::fs;

use fitscope::data::assets::find_asset_files;
use fitscope::error::AssetError;

#[test]
fn finds_the_pair_in_any_letter_case() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Feature.csv"), "main_id,temp\n1,2\n").unwrap();
    fs::write(dir.path().join("TARGET.CSV"), "main_id,yield\n1,3\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignore").unwrap();

    let files = find_asset_files(dir.path()).unwrap();
    assert_eq!(files.feature.file_name().unwrap(), "Feature.csv");
    assert_eq!(files.target.file_name().unwrap(), "TARGET.CSV");
    assert_eq!(files.folder, dir.path());
    assert!(!files.folder_name().is_empty());
}

#[test]
fn missing_target_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("feature.csv"), "a\n").unwrap();
    let err = find_asset_files(dir.path()).unwrap_err();
    assert!(matches!(err, AssetError::MissingFiles(_)));
}

#[test]
fn directories_named_like_the_files_do_not_count() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("feature.csv")).unwrap();
    fs::write(dir.path().join("target.csv"), "a\n").unwrap();
    assert!(find_asset_files(dir.path()).is_err());
}

#[test]
fn unreadable_folder_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    assert!(matches!(
        find_asset_files(&missing),
        Err(AssetError::Io { .. })
    ));
}
