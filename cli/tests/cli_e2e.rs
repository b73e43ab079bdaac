//! End-to-end tests for the `vcxgen` binary.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn vcxgen_cmd() -> Command {
    Command::cargo_bin("vcxgen").unwrap()
}

fn write_delimited_config(temp: &assert_fs::TempDir) {
    temp.child("Wave.vs_solution_config")
        .write_str("Wave\nsource\n")
        .unwrap();
    temp.child("engine_debug.vs_project_config")
        .write_str(
            "engine\nDebug\nx64\nscons debug\nscons -c\nscons -c && scons debug\nbin\\engine.exe\n_DEBUG\nengine/main.cpp;engine/util/str.h\nsource\n1\n1\n",
        )
        .unwrap();
}

#[test]
fn test_help() {
    vcxgen_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--deterministic-ids"))
        .stdout(predicate::str::contains("--clean"));
}

#[test]
fn test_generate_writes_solution_and_project_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_delimited_config(&temp);

    vcxgen_cmd()
        .arg(temp.path())
        .arg("--deterministic-ids")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 'Wave'"));

    temp.child("Wave.sln")
        .assert(predicate::str::contains("engine\\engine.vcxproj"));
    temp.child("engine/engine.vcxproj")
        .assert(predicate::str::contains(
            "<ClCompile Include=\"..\\source\\engine\\main.cpp\"/>",
        ))
        .assert(predicate::str::contains(
            "<ProjectGuid>{00000000-0000-0000-0000-000000000001}</ProjectGuid>",
        ));
    temp.child("engine/engine.vcxproj.filters")
        .assert(predicate::str::contains("<Filter Include=\"engine\\util\">"));
}

#[test]
fn test_quiet_generate_prints_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_delimited_config(&temp);

    vcxgen_cmd()
        .arg(temp.path())
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    temp.child("Wave.sln").assert(predicate::path::exists());
}

#[test]
fn test_output_dir_is_used() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_delimited_config(&temp);
    let out = temp.child("ide");

    vcxgen_cmd()
        .arg(temp.path())
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success();

    out.child("Wave.sln").assert(predicate::path::exists());
    out.child("engine/engine.vcxproj")
        .assert(predicate::str::contains("..\\..\\source\\engine\\main.cpp"));
    temp.child("Wave.sln").assert(predicate::path::missing());
}

#[test]
fn test_plan_json_writes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_delimited_config(&temp);

    vcxgen_cmd()
        .arg(temp.path())
        .args(["--plan", "-f", "json", "--deterministic-ids"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Wave\""))
        .stdout(predicate::str::contains("engine\\\\util"));

    temp.child("Wave.sln").assert(predicate::path::missing());
}

#[test]
fn test_plan_table_lists_projects() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_delimited_config(&temp);

    vcxgen_cmd()
        .arg(temp.path())
        .arg("--plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("engine"))
        .stdout(predicate::str::contains("Debug|x64"));
}

#[test]
fn test_clean_removes_generated_files_and_records() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_delimited_config(&temp);
    temp.child("notes.md").write_str("keep").unwrap();

    vcxgen_cmd().arg(temp.path()).arg("-q").assert().success();
    temp.child("Wave.sln").assert(predicate::path::exists());

    vcxgen_cmd()
        .arg(temp.path())
        .arg("--clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 4 items"));

    temp.child("Wave.sln").assert(predicate::path::missing());
    temp.child("engine").assert(predicate::path::missing());
    temp.child("Wave.vs_solution_config")
        .assert(predicate::path::missing());
    temp.child("notes.md").assert(predicate::path::exists());
}

#[test]
fn test_missing_solution_config_fails_with_single_line() {
    let temp = assert_fs::TempDir::new().unwrap();

    vcxgen_cmd()
        .arg(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("vs_solution_config"))
        .stderr(predicate::function(|err: &str| err.trim_end().lines().count() == 1));
}

#[test]
fn test_unknown_source_type_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.child("wave.json");
    config.write_str("{}").unwrap();

    vcxgen_cmd()
        .arg(config.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unrecognized config source"));
}

#[test]
fn test_missing_settings_file_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_delimited_config(&temp);

    vcxgen_cmd()
        .arg(temp.path())
        .arg("--settings")
        .arg(temp.child("nope.toml").path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("settings"));
}

#[test]
fn test_settings_file_overrides_toolset() {
    let temp = assert_fs::TempDir::new().unwrap();
    write_delimited_config(&temp);
    temp.child("vcxgen.toml")
        .write_str("[project]\nplatform_toolset = \"v143\"\n")
        .unwrap();

    vcxgen_cmd().arg(temp.path()).assert().success();
    temp.child("engine/engine.vcxproj")
        .assert(predicate::str::contains("<PlatformToolset>v143</PlatformToolset>"));
}

#[test]
fn test_completions_print_script() {
    vcxgen_cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vcxgen"));
}

#[test]
fn test_no_arguments_is_a_single_line_usage_error() {
    vcxgen_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("<PATH>"))
        .stderr(predicate::function(|err: &str| err.trim_end().lines().count() == 1));
}

#[test]
fn test_unknown_flag_is_a_single_line_usage_error() {
    vcxgen_cmd()
        .args(["--bogus", "x"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("--bogus"))
        .stderr(predicate::function(|err: &str| err.trim_end().lines().count() == 1));
}

#[test]
fn test_unsupported_completion_shell_is_rejected() {
    vcxgen_cmd()
        .args(["--completions", "powershell"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::function(|err: &str| err.trim_end().lines().count() == 1));
}
