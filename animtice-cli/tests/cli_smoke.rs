use std::path::PathBuf;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_animtice"))
}

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_lists_every_lesson() {
    let out = bin().arg("list").output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert_eq!(text.lines().count(), 7);
    assert!(text.contains("m3-l15-perimeter"));
}

#[test]
fn cli_frame_writes_svg_for_a_step() {
    let out_path = out_dir("frame").join("lines.svg");
    let _ = std::fs::remove_file(&out_path);

    let status = bin()
        .args(["frame", "m3-g06-lines", "--quality", "low", "--step", "intro", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();
    assert!(status.success());

    let svg = std::fs::read_to_string(&out_path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="854""#));
}

#[test]
fn cli_timeline_applies_config_overrides() {
    let dir = out_dir("timeline");
    let config_path = dir.join("sharing.json");
    let out_path = dir.join("sharing_timeline.json");
    std::fs::write(
        &config_path,
        r#"{ "examples": [{ "total": 6, "groups": 2 }], "assessment": { "total": 8, "groups": 2 }, "assessment_answer": 4 }"#,
    )
    .unwrap();

    let status = bin()
        .args(["timeline", "m3-l16-division-sharing", "--quality", "low", "--config"])
        .arg(&config_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();
    assert!(status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json["fps"]["num"], 15);
    assert!(json["markers"].as_array().is_some_and(|m| !m.is_empty()));
}

#[test]
fn cli_rejects_unknown_lesson() {
    let out_path = out_dir("unknown").join("t.json");
    let out = bin()
        .args(["timeline", "m3-l99-unknown", "--out"])
        .arg(&out_path)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown lesson"));
}
