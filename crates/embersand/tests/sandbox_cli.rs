use std::process::Command;

use tempfile::TempDir;

fn embersand() -> Command {
    Command::new(env!("CARGO_BIN_EXE_embersand"))
}

#[test]
fn list_json_contains_every_category() {
    let output = embersand()
        .args(["list", "--json"])
        .output()
        .expect("failed to run embersand list");
    assert!(output.status.success());

    let records: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("list output is valid JSON");
    let records = records.as_array().expect("list output is an array");
    assert!(records.len() >= 30);

    for category in ["simple", "time", "touch", "generative", "transition", "blur"] {
        assert!(
            records
                .iter()
                .any(|record| record["category"] == category),
            "missing category {category}"
        );
    }
    assert!(records
        .iter()
        .any(|record| record["function"] == "gradientFill"));
}

#[test]
fn preview_rejects_unknown_effects() {
    let status = embersand()
        .args(["preview", "No Such Shader"])
        .status()
        .expect("failed to run embersand preview");
    assert!(!status.success());
}

#[test]
fn mask_writes_a_png_and_prints_two_passes() {
    let root = TempDir::new().unwrap();
    let out = root.path().join("mask.png");

    let output = embersand()
        .args(["mask", "gradient", "--size", "64x64"])
        .arg("--out")
        .arg(&out)
        .output()
        .expect("failed to run embersand mask");
    assert!(output.status.success());
    assert!(out.exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("variableBlur").count(), 2);
}

#[test]
fn prefs_round_trip_through_the_cli() {
    let root = TempDir::new().unwrap();
    let file = root.path().join("prefs.toml");

    let status = embersand()
        .arg("prefs")
        .arg("--file")
        .arg(&file)
        .args(["set", "--preview", "emoji", "--fps", "30"])
        .status()
        .expect("failed to run embersand prefs set");
    assert!(status.success());

    let output = embersand()
        .arg("prefs")
        .arg("--file")
        .arg(&file)
        .arg("show")
        .output()
        .expect("failed to run embersand prefs show");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Emoji"));
    assert!(stdout.contains("30"));
}
