use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn safeio() -> Command {
    Command::new(env!("CARGO_BIN_EXE_safeio"))
}

#[test]
fn test_cli_help() {
    let output = safeio()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("permission and encoding checks"));
}

#[test]
fn test_cli_read_prints_text() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("hello.py");
    fs::write(&file, "print('Hello')\n").unwrap();

    let output = safeio().arg("read").arg(&file).output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "print('Hello')\n");
}

#[test]
fn test_cli_read_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("legacy.py");
    fs::write(&file, b"# coding: latin-1\r\nname = '\xE9'\r\n").unwrap();

    let output = safeio()
        .args(["read", "--json"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["encoding"], "iso-8859-1");
    assert_eq!(report["newline"], "crlf");
    assert_eq!(report["text"], "# coding: latin-1\r\nname = 'é'\r\n");
}

#[test]
fn test_cli_detect() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("sig.py");
    fs::write(&file, b"\xEF\xBB\xBFx = 1\n").unwrap();

    let output = safeio().arg("detect").arg(&file).output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "utf-8-sig");
}

#[test]
fn test_cli_write_from_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("target.py");
    fs::write(&file, "old\n").unwrap();

    let mut child = safeio()
        .args(["write", "--encoding", "latin-1"])
        .arg(&file)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all("name = 'é'\n".as_bytes())
        .unwrap();
    let status = child.wait().unwrap();

    assert!(status.success());
    assert_eq!(fs::read(&file).unwrap(), b"name = '\xE9'\n");
}

#[test]
fn test_cli_write_from_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("target.py");
    let input = temp_dir.path().join("input.txt");
    fs::write(&file, "old\n").unwrap();
    fs::write(&input, "import time\ntime.time()\n").unwrap();

    let output = safeio()
        .arg("write")
        .arg(&file)
        .arg("--input")
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "import time\ntime.time()\n"
    );
}

#[test]
fn test_cli_read_conflict_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("conflict.py");
    fs::write(&file, "\u{feff}\n# -*- coding: utf-32 -*-\nbad encoding").unwrap();

    let output = safeio().arg("read").arg(&file).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unparsable file"));
}

#[test]
fn test_cli_unknown_encoding_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("target.py");
    fs::write(&file, "old\n").unwrap();

    let output = safeio()
        .args(["write", "--encoding", "klingon"])
        .arg(&file)
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), "old\n");
}

#[cfg(unix)]
#[test]
fn test_cli_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    // SAFETY: geteuid takes no arguments and cannot fail.
    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("locked.py");
    fs::write(&file, "secret\n").unwrap();
    fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).unwrap();

    let output = safeio().arg("read").arg(&file).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("permission denied [READ]"));
}
