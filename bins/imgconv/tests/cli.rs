//! CLI end-to-end tests

use assert_cmd::prelude::*;
use image::{DynamicImage, Rgb, RgbImage};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Get a command for the imgconv binary, isolated from any ambient config.
#[allow(deprecated)]
fn imgconv_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("imgconv").unwrap();
    cmd.current_dir(cwd)
        .env_remove("IMGCONV_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let img = RgbImage::from_fn(20, 10, |x, y| Rgb([(x * 12) as u8, (y * 25) as u8, 128]));
    DynamicImage::ImageRgb8(img).save(&path).unwrap();
    path
}

fn workspace() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let input = write_png(dir.path(), "photo.png");
    (dir, input)
}

#[test]
fn test_cli_help_flag() {
    let dir = tempdir().unwrap();
    imgconv_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_convert_png_to_jpeg() {
    let (dir, input) = workspace();
    let output = dir.path().join("photo.jpg");

    imgconv_cmd(dir.path())
        .args(["convert", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--quality", "75"])
        .assert()
        .success();

    let decoded = image::open(&output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (20, 10));
}

#[test]
fn test_cli_convert_json_report() {
    let (dir, input) = workspace();
    let output = dir.path().join("photo.bmp");

    imgconv_cmd(dir.path())
        .args(["convert", "--json", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"output_format\": \"bmp\""))
        .stdout(predicate::str::contains("\"width\": 20"));
}

#[test]
fn test_cli_svg_input_is_unsupported_conversion() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.svg");
    fs::write(&input, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
    let output = dir.path().join("logo.png");

    imgconv_cmd(dir.path())
        .args(["convert", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unsupported conversion"));

    assert!(!output.exists());
}

#[test]
fn test_cli_ico_output_is_unsupported_conversion() {
    let (dir, input) = workspace();
    let output = dir.path().join("favicon.ico");

    imgconv_cmd(dir.path())
        .args(["convert", "--ico", "32", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(4);

    assert!(!output.exists());
}

#[test]
fn test_cli_quality_out_of_range() {
    let (dir, input) = workspace();
    let output = dir.path().join("photo.jpg");

    imgconv_cmd(dir.path())
        .args(["convert", "-q", "150", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("quality"));

    assert!(!output.exists());
}

#[test]
fn test_cli_unknown_extension() {
    let (dir, input) = workspace();
    let output = dir.path().join("photo.xyz");

    imgconv_cmd(dir.path())
        .args(["convert", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(3);
}

#[test]
fn test_cli_missing_input_file() {
    let dir = tempdir().unwrap();

    imgconv_cmd(dir.path())
        .args(["convert", "-i", "absent.png", "-o", "out.jpg"])
        .assert()
        .code(1);
}

#[test]
fn test_cli_formats_json() {
    let dir = tempdir().unwrap();
    imgconv_cmd(dir.path())
        .args(["formats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"webp\""))
        .stdout(predicate::str::contains("image/x-icon"));
}

#[test]
fn test_cli_formats_table() {
    let dir = tempdir().unwrap();
    imgconv_cmd(dir.path())
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("jpeg"))
        .stdout(predicate::str::contains("quality"));
}

#[test]
fn test_cli_detect_png() {
    let (dir, input) = workspace();
    imgconv_cmd(dir.path())
        .arg("detect")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("image/png"));
}

#[test]
fn test_cli_detect_unrecognized() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.png");
    fs::write(&path, "plain text").unwrap();

    imgconv_cmd(dir.path())
        .arg("detect")
        .arg(&path)
        .assert()
        .code(1);
}

#[test]
fn test_cli_batch_into_out_dir() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("nested")).unwrap();
    write_png(&src, "a.png");
    write_png(&src, "b.png");
    write_png(&src.join("nested"), "c.png");
    fs::write(src.join("readme.txt"), "not an image").unwrap();
    let out = dir.path().join("out");

    imgconv_cmd(dir.path())
        .args(["batch", "--sequential", "-r", "--to", "jpg", "--out-dir"])
        .arg(&out)
        .arg(&src)
        .assert()
        .success();

    assert!(out.join("a.jpg").exists());
    assert!(out.join("b.jpg").exists());
    assert!(out.join("nested/c.jpg").exists());
    assert!(!out.join("readme.jpg").exists());
}

#[test]
fn test_cli_batch_non_recursive_skips_subdirs() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("nested")).unwrap();
    write_png(dir.path(), "a.png");
    write_png(&dir.path().join("nested"), "c.png");

    imgconv_cmd(dir.path())
        .args(["batch", "--to", "tiff", "."])
        .assert()
        .success();

    assert!(dir.path().join("a.tiff").exists());
    assert!(!dir.path().join("nested/c.tiff").exists());
}

#[test]
fn test_cli_batch_same_stem_converts_once() {
    let dir = tempdir().unwrap();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])))
        .save(dir.path().join("photo.png"))
        .unwrap();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([0, 0, 255])))
        .save(dir.path().join("photo.bmp"))
        .unwrap();

    let output = imgconv_cmd(dir.path())
        .args(["batch", "--json", "--to", "tiff", "."])
        .assert()
        .success()
        .stderr(predicate::str::contains("already claimed"))
        .get_output()
        .stdout
        .clone();

    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0]["input"].as_str().unwrap().ends_with("photo.bmp"));

    // Inputs are visited in name order, so the BMP owns photo.tiff.
    let converted = image::open(dir.path().join("photo.tiff")).unwrap();
    assert_eq!((converted.width(), converted.height()), (8, 8));
}

#[test]
fn test_cli_batch_reports_failures() {
    let dir = tempdir().unwrap();
    write_png(dir.path(), "good.png");
    fs::write(dir.path().join("broken.png"), b"\x89PNG\r\n\x1a\ntruncated").unwrap();

    imgconv_cmd(dir.path())
        .args(["batch", "--to", "bmp", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 of 2 conversions failed"));

    assert!(dir.path().join("good.bmp").exists());
    assert!(!dir.path().join("broken.bmp").exists());
}

#[test]
fn test_cli_batch_rejects_webp_target() {
    let (dir, _) = workspace();
    imgconv_cmd(dir.path())
        .args(["batch", "--to", "webp", "."])
        .assert()
        .code(4);
}

#[test]
fn test_cli_config_supplies_quality() {
    let (dir, input) = workspace();
    fs::write(dir.path().join(".imgconv.toml"), "[defaults]\nquality = 500\n").unwrap();

    imgconv_cmd(dir.path())
        .args(["convert", "-i"])
        .arg(&input)
        .args(["-o", "photo.jpg"])
        .assert()
        .code(2);

    imgconv_cmd(dir.path())
        .args(["convert", "-q", "80", "-i"])
        .arg(&input)
        .args(["-o", "photo.jpg"])
        .assert()
        .success();
}

#[test]
fn test_cli_bad_config_file() {
    let (dir, input) = workspace();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[defaults]\nsharpness = 3\n").unwrap();

    imgconv_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["convert", "-i"])
        .arg(&input)
        .args(["-o", "photo.jpg"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("config"));
}
