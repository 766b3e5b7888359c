use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    let path = repo_root()
        .join("fixtures")
        .join("character")
        .join("basic.json");
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn png_size(bytes: &[u8]) -> (u32, u32) {
    let decoder = png::Decoder::new(bytes);
    let reader = decoder.read_info().expect("png header");
    let info = reader.info();
    (info.width, info.height)
}

#[test]
fn cli_renders_png_smoke() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("sheet.png");

    let exe = assert_cmd::cargo_bin!("emosheet-cli");
    Command::new(exe)
        .args([
            "render",
            "--theme",
            "pastel",
            "--notes-from-memo",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
    assert_eq!(png_size(&bytes), (1500, 1000));
}

#[test]
fn cli_writes_default_export_name_in_working_dir() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let exe = assert_cmd::cargo_bin!("emosheet-cli");
    Command::new(exe)
        .current_dir(tmp.path())
        .args(["--scale", "0.5", fixture().to_string_lossy().as_ref()])
        .assert()
        .success();

    let names: Vec<String> = fs::read_dir(tmp.path())
        .expect("read tmp")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 1, "{names:?}");
    let name = &names[0];
    let millis = name
        .strip_prefix("emoklore_sheet_")
        .and_then(|rest| rest.strip_suffix(".png"))
        .unwrap_or_else(|| panic!("unexpected export name {name}"));
    assert!(millis.chars().all(|c| c.is_ascii_digit()), "{name}");

    let bytes = fs::read(tmp.path().join(name)).expect("read png");
    assert_eq!(png_size(&bytes), (750, 500));
}

#[test]
fn cli_extract_prints_model_json() {
    let exe = assert_cmd::cargo_bin!("emosheet-cli");
    let output = Command::new(exe)
        .args(["extract", fixture().to_string_lossy().as_ref()])
        .output()
        .expect("run");
    assert!(output.status.success());

    let model: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(model["name"], "久遠寺 朔");
    assert_eq!(model["resonance"]["front"], "信頼");
}

#[test]
fn cli_svg_goes_to_stdout() {
    let exe = assert_cmd::cargo_bin!("emosheet-cli");
    let output = Command::new(exe)
        .args([
            "render",
            "--format",
            "svg",
            "--id",
            "pc 1",
            fixture().to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run");
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).expect("utf8");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"id="pc-1""#));
}

#[test]
fn cli_reports_bad_input_and_usage_errors() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bad = tmp.path().join("bad.json");
    fs::write(&bad, "{ \"data\": ").expect("write");

    let exe = assert_cmd::cargo_bin!("emosheet-cli");
    Command::new(exe)
        .current_dir(tmp.path())
        .arg(bad.to_string_lossy().as_ref())
        .assert()
        .code(1);

    let exe = assert_cmd::cargo_bin!("emosheet-cli");
    Command::new(exe)
        .args(["--theme", "sepia"])
        .assert()
        .code(2);

    let exe = assert_cmd::cargo_bin!("emosheet-cli");
    Command::new(exe)
        .args(["--width", "1000", fixture().to_string_lossy().as_ref()])
        .current_dir(tmp.path())
        .assert()
        .code(1);
}
