//! CLI integration tests using the REAL hookchain binary

mod common;

use common::{TestPipeline, display, hookchain_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    hookchain_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolves the hook chains and settings"))
        .stdout(predicate::str::contains("setting"))
        .stdout(predicate::str::contains("chain"))
        .stdout(predicate::str::contains("run-by-name"));
}

#[test]
fn test_short_help_output() {
    hookchain_cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolve bundle hooks and settings"));
}

#[test]
fn test_setting_prints_processed_json() {
    let pipeline = TestPipeline::with_demo_bundle();
    let expected = display(&pipeline.file("config").join("thumbs/a.png"));

    pipeline
        .cmd()
        .args(["setting", "thumbnails"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_setting_default_is_used_when_unset() {
    let pipeline = TestPipeline::with_demo_bundle();

    pipeline
        .cmd()
        .args(["setting", "label", "--default", "\"untitled\""])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"untitled\""));
}

#[test]
fn test_setting_rejects_invalid_default_json() {
    let pipeline = TestPipeline::with_demo_bundle();

    pipeline
        .cmd()
        .args(["setting", "label", "--default", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--default is not valid JSON"));
}

#[test]
fn test_chain_lists_base_layer_first() {
    let pipeline = TestPipeline::with_demo_bundle();
    let base = display(&pipeline.file("bundles/demo/hooks/scan.py"));
    let custom = display(&pipeline.file("config/hooks/studio_scan.py"));

    pipeline
        .cmd()
        .args(["chain", "hook_scan"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{base}\n{custom}\n")))
        .stderr(predicate::str::contains("inherits manifest default"));
}

#[test]
fn test_chain_reports_missing_engine_hook() {
    let pipeline = TestPipeline::with_demo_bundle();

    pipeline
        .cmd()
        .args(["chain", "hook_open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("open.py"))
        .stderr(predicate::str::contains("tk-maya"))
        .stderr(predicate::str::contains("not inherited"));
}

#[test]
fn test_resolve_expression() {
    let pipeline = TestPipeline::with_demo_bundle();
    let expected = display(&pipeline.file("bundles/demo/hooks/scan.py"));

    pipeline
        .cmd()
        .args(["resolve", "default", "--setting", "hook_scan"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_resolve_missing_env_var_fails() {
    let pipeline = TestPipeline::with_demo_bundle();

    pipeline
        .cmd()
        .env_remove("HOOKCHAIN_TEST_UNSET_VAR")
        .args(["resolve", "{$HOOKCHAIN_TEST_UNSET_VAR}/scan.py"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HOOKCHAIN_TEST_UNSET_VAR"));
}

#[test]
fn test_resolve_reads_process_environment() {
    let pipeline = TestPipeline::with_demo_bundle();

    pipeline
        .cmd()
        .env("HOOKCHAIN_TEST_HOOKS", "/studio/hooks")
        .args(["resolve", "{$HOOKCHAIN_TEST_HOOKS}/scan.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scan.py"))
        .stdout(predicate::str::contains("studio"));
}

#[test]
fn test_unknown_bundle_lists_configured_bundles() {
    let pipeline = TestPipeline::with_demo_bundle();

    hookchain_cmd()
        .arg("--config")
        .arg(&pipeline.path)
        .arg("--environment")
        .arg(pipeline.environment_file())
        .args(["--bundle", "tk-multi-missing", "setting", "icon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tk-multi-missing"))
        .stderr(predicate::str::contains("tk-multi-demo"));
}

#[test]
fn test_missing_target_options_fail() {
    hookchain_cmd()
        .env_remove("HOOKCHAIN_CONFIG")
        .env_remove("HOOKCHAIN_ENVIRONMENT")
        .args(["setting", "icon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--config is required"));
}

#[test]
fn test_malformed_reference_is_reported() {
    let pipeline = TestPipeline::with_demo_bundle();

    pipeline
        .cmd()
        .args(["resolve", "{$}/scan.py", "--setting", "hook_scan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hook_scan"))
        .stderr(predicate::str::contains("Error:"));
}

#[cfg(unix)]
#[test]
fn test_run_executes_chain_through_interpreter() {
    let pipeline = TestPipeline::with_demo_bundle();
    // The base layer echoes the JSON payload it receives on stdin
    pipeline.write_file("bundles/demo/hooks/scan.py", "cat\n");
    pipeline.write_file("config/hooks/studio_scan.py", "");

    pipeline
        .cmd()
        .args(["--interpreter", "sh"])
        .args(["run", "hook_scan", "--method", "validate", "--arg", "item=shot_010"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"method\": \"validate\""))
        .stdout(predicate::str::contains("\"item\": \"shot_010\""))
        .stdout(predicate::str::contains("\"name\": \"tk-multi-demo\""));
}

#[cfg(unix)]
#[test]
fn test_run_by_name_executes_config_hook() {
    let pipeline = TestPipeline::with_demo_bundle();
    pipeline.write_file("config/hooks/after_load.py", "cat >/dev/null\necho '[1, 2]'\n");

    pipeline
        .cmd()
        .args(["--interpreter", "sh", "run-by-name", "after_load"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"))
        .stdout(predicate::str::contains("2"));
}

#[cfg(unix)]
#[test]
fn test_run_reports_missing_hook_file() {
    let pipeline = TestPipeline::with_demo_bundle();

    pipeline
        .cmd()
        .args(["--interpreter", "sh", "run", "hook_scan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hook file does not exist"));
}

#[test]
fn test_completions_bash() {
    hookchain_cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hookchain"));
}
