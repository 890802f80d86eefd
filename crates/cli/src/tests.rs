use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use filetime::{FileTime, set_file_mtime};
use tempfile::tempdir;

use super::*;

fn run_with_args(args: &[&OsStr]) -> (i32, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = run(
        std::iter::once(OsStr::new("dirmirror"))
            .chain(args.iter().copied())
            .collect::<Vec<_>>(),
        &mut stdout,
        &mut stderr,
    );
    (
        status,
        String::from_utf8(stdout).expect("stdout is utf-8"),
        String::from_utf8(stderr).expect("stderr is utf-8"),
    )
}

fn os<P: AsRef<OsStr> + ?Sized>(value: &P) -> &OsStr {
    value.as_ref()
}

fn write_file(path: &Path, contents: &str, mtime: i64) {
    fs::write(path, contents).expect("write fixture file");
    set_file_mtime(path, FileTime::from_unix_time(mtime, 0)).expect("pin mtime");
}

#[test]
fn help_goes_to_stdout() {
    let (status, stdout, stderr) = run_with_args(&[os("--help")]);

    assert_eq!(status, 0);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("INTERVAL_SECONDS"));
    assert!(stdout.contains("--once"));
    assert!(stderr.is_empty());
}

#[test]
fn version_reports_package_version() {
    let (status, stdout, stderr) = run_with_args(&[os("-V")]);

    assert_eq!(status, 0);
    assert_eq!(
        stdout.trim_end(),
        format!("dirmirror {}", env!("CARGO_PKG_VERSION"))
    );
    assert!(stderr.is_empty());
}

#[test]
fn missing_operands_print_usage() {
    let (status, stdout, stderr) = run_with_args(&[]);

    assert_eq!(status, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Usage:"));
}

#[test]
fn empty_argument_list_is_treated_as_missing_operands() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = run(Vec::<OsString>::new(), &mut stdout, &mut stderr);

    assert_eq!(status, 1);
    assert!(String::from_utf8_lossy(&stderr).contains("Usage:"));
}

#[test]
fn zero_interval_is_rejected_before_touching_disk() {
    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("source");
    let replica = dir.path().join("replica");
    let log = dir.path().join("run.log");
    fs::create_dir(&source).expect("create source");

    let (status, _, stderr) = run_with_args(&[
        source.as_os_str(),
        replica.as_os_str(),
        os("0"),
        log.as_os_str(),
    ]);

    assert_eq!(status, 1);
    assert!(stderr.contains("invalid INTERVAL_SECONDS"));
    assert!(!replica.exists());
    assert!(!log.exists());
}

#[test]
fn non_numeric_interval_is_rejected() {
    let (status, _, stderr) = run_with_args(&[os("src"), os("dst"), os("abc")]);

    assert_eq!(status, 1);
    assert!(stderr.contains("abc"));
}

#[test]
fn unopenable_log_file_is_a_configuration_error() {
    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("source");
    fs::create_dir(&source).expect("create source");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").expect("write blocker");
    let log = blocker.join("run.log");

    let (status, stdout, stderr) = run_with_args(&[
        os("--once"),
        source.as_os_str(),
        dir.path().join("replica").as_os_str(),
        os("5"),
        log.as_os_str(),
    ]);

    assert_eq!(status, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to open log file"));
}

#[test]
fn once_mirrors_source_and_logs() {
    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("source");
    let replica = dir.path().join("replica");
    let log = dir.path().join("run.log");
    fs::create_dir(&source).expect("create source");
    fs::create_dir(&replica).expect("create replica");
    write_file(&source.join("a.txt"), "alpha", 1_700_000_100);
    write_file(&source.join("b.txt"), "bravo-new", 1_700_000_200);
    write_file(&replica.join("b.txt"), "bravo-old", 1_700_000_000);
    write_file(&replica.join("c.txt"), "charlie", 1_700_000_000);

    let (status, stdout, stderr) = run_with_args(&[
        os("--once"),
        source.as_os_str(),
        replica.as_os_str(),
        os("5"),
        log.as_os_str(),
    ]);

    assert_eq!(status, 0, "stderr: {stderr}");
    assert_eq!(
        fs::read_to_string(replica.join("a.txt")).expect("a.txt"),
        "alpha"
    );
    assert_eq!(
        fs::read_to_string(replica.join("b.txt")).expect("b.txt"),
        "bravo-new"
    );
    assert!(!replica.join("c.txt").exists());

    assert!(stdout.contains("Synchronization started. Interval: 5 seconds."));
    assert!(stdout.contains("Copied: a.txt"));
    assert!(stdout.contains("Copied: b.txt"));
    assert!(stdout.contains("Deleted: c.txt"));
    assert!(stdout.contains("Synchronization stopped."));
    assert!(!stdout.contains(PRESS_ENTER_HINT));

    let logged = fs::read_to_string(&log).expect("read log");
    assert!(logged.lines().any(|line| line.ends_with(": Copied: a.txt")));
    assert!(logged.lines().any(|line| line.ends_with(": Deleted: c.txt")));
}

#[test]
fn once_with_missing_source_exits_with_failure() {
    let dir = tempdir().expect("tempdir");
    let replica = dir.path().join("replica");
    let log = dir.path().join("run.log");

    let (status, stdout, _) = run_with_args(&[
        os("--once"),
        dir.path().join("absent").as_os_str(),
        replica.as_os_str(),
        os("5"),
        log.as_os_str(),
    ]);

    assert_eq!(status, 1);
    assert!(stdout.contains("doesn't exist."));
    assert!(!replica.exists());
}

#[test]
fn exit_codes_are_clamped() {
    let debug = |code: ExitCode| format!("{code:?}");

    assert_eq!(debug(exit_code_from(0)), debug(ExitCode::SUCCESS));
    assert_eq!(debug(exit_code_from(-3)), debug(ExitCode::from(0)));
    assert_eq!(debug(exit_code_from(1)), debug(ExitCode::from(1)));
    assert_eq!(debug(exit_code_from(1_000)), debug(ExitCode::from(u8::MAX)));
}
