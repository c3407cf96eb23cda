use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;

#[fixture]
pub fn store_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn run_redline_command(args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("redline").expect("redline binary should build");
    cmd.args(args);
    cmd
}
