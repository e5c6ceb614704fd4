use std::fs;
use std::path::Path;

use boxset_core::ImageKind;
use boxset_nfo::{ScanOptions, scan_library};
use tempfile::TempDir;

fn write_movie(dir: &Path, stem: &str, nfo: &str, video_ext: Option<&str>) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(format!("{stem}.nfo")), nfo).unwrap();
    if let Some(ext) = video_ext {
        fs::write(dir.join(format!("{stem}.{ext}")), b"").unwrap();
    }
}

fn movie_nfo(title: &str, set: Option<&str>) -> String {
    let set = set
        .map(|s| format!("<set><name>{s}</name></set>"))
        .unwrap_or_default();
    format!("<movie><title>{title}</title><year>1984</year>{set}</movie>")
}

#[test]
fn scans_nested_library_in_sorted_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_movie(
        &root.join("Dune Part Two (2024)"),
        "Dune Part Two (2024)",
        &movie_nfo("Dune: Part Two", Some("Dune Saga")),
        Some("mkv"),
    );
    write_movie(
        &root.join("Dune (2021)"),
        "Dune (2021)",
        &movie_nfo("Dune", Some("Dune Saga")),
        Some("MKV"),
    );
    write_movie(&root.join("Heat (1995)"), "Heat (1995)", &movie_nfo("Heat", None), Some("mp4"));

    let report = scan_library(root, &ScanOptions::default()).unwrap();

    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert_eq!(report.nfo_files, 3);
    let names: Vec<_> = report.titles.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Dune", "Dune: Part Two", "Heat"]);
    assert_eq!(report.titles[0].collection.as_deref(), Some("Dune Saga"));
    assert_eq!(report.titles[2].collection, None);
    assert!(
        report.titles[0]
            .video_path
            .as_ref()
            .unwrap()
            .ends_with("Dune (2021)/Dune (2021).MKV")
    );
}

#[test]
fn malformed_nfo_is_a_warning_not_an_error() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_movie(root, "Broken", "<movie><title>Broken</movie>", Some("mkv"));
    write_movie(root, "Show", "<tvshow><title>Show</title></tvshow>", Some("mkv"));
    write_movie(root, "Good", &movie_nfo("Good", Some("Set")), Some("mkv"));

    let report = scan_library(root, &ScanOptions::default()).unwrap();

    assert_eq!(report.nfo_files, 3);
    assert_eq!(report.titles.len(), 1);
    assert_eq!(report.titles[0].name, "Good");
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn missing_video_is_skipped_unless_allowed() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_movie(root, "Orphan", &movie_nfo("Orphan", Some("Set")), None);

    let strict = scan_library(root, &ScanOptions::default()).unwrap();
    assert!(strict.titles.is_empty());
    assert_eq!(strict.warnings.len(), 1);
    assert!(strict.warnings[0].message.contains("no matching video"));

    let lenient = scan_library(root, &ScanOptions::new().require_video(false)).unwrap();
    assert_eq!(lenient.titles.len(), 1);
    assert_eq!(lenient.titles[0].video_path, None);
    assert!(lenient.titles[0].item_path().ends_with("Orphan.nfo"));
}

#[test]
fn folder_style_movie_nfo_uses_folder_video() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Alien (1979)");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("movie.nfo"), movie_nfo("Alien", Some("Alien Collection"))).unwrap();
    fs::write(dir.join("Alien.1979.Remastered.mkv"), b"").unwrap();

    let report = scan_library(tmp.path(), &ScanOptions::default()).unwrap();
    assert_eq!(report.titles.len(), 1);
    assert!(
        report.titles[0]
            .video_path
            .as_ref()
            .unwrap()
            .ends_with("Alien.1979.Remastered.mkv")
    );
}

#[test]
fn finds_local_artwork() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_movie(root, "Alien", &movie_nfo("Alien", Some("Alien Collection")), Some("mkv"));
    fs::write(root.join("Alien-Poster.JPG"), b"").unwrap();
    fs::write(root.join("banner.png"), b"").unwrap();
    fs::write(root.join("folder.jpg"), b"").unwrap();

    let report = scan_library(root, &ScanOptions::default()).unwrap();
    let artwork = &report.titles[0].artwork;
    assert!(artwork.get(ImageKind::Poster).unwrap().ends_with("Alien-Poster.JPG"));
    assert!(artwork.get(ImageKind::Banner).unwrap().ends_with("banner.png"));
}

#[test]
fn title_defaults_to_file_stem() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_movie(root, "Nameless", "<movie><set>Set</set></movie>", Some("avi"));

    let report = scan_library(root, &ScanOptions::default()).unwrap();
    assert_eq!(report.titles[0].name, "Nameless");
}

#[test]
fn hidden_directories_are_skipped() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_movie(&root.join(".actors"), "Hidden", &movie_nfo("Hidden", None), Some("mkv"));

    let report = scan_library(root, &ScanOptions::default()).unwrap();
    assert_eq!(report.nfo_files, 0);
}

#[test]
fn unreadable_root_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("does-not-exist");
    assert!(scan_library(&missing, &ScanOptions::default()).is_err());
}
