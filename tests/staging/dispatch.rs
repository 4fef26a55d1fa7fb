//! Command dispatch: validation, config checks and processor hand-off

use dpr::cli::{run, EXIT_FAILURE};
use dpr::fs::{CollectionLayout, StagingDir};
use std::path::Path;

use super::helpers::{file_names, temp_root, touch, write_properties, RecordingRunner};

fn args<'a>(properties: &'a Path, rest: &[&'a str]) -> Vec<String> {
    let mut all = vec!["dpr".to_string(), properties.display().to_string()];
    all.extend(rest.iter().map(|s| s.to_string()));
    all
}

#[test]
fn test_invalid_bridge_extension_exits_without_spawning() {
    let temp = temp_root();
    let properties = write_properties(temp.path());
    let runner = RecordingRunner::new(0);

    let code = run(args(&properties, &["bridge", "xml", "static", "col1"]), &runner);

    assert_eq!(code, EXIT_FAILURE);
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn test_invalid_gateway_args_stage_nothing() {
    let temp = temp_root();
    let properties = write_properties(temp.path());
    let layout = CollectionLayout::new(temp.path().join("collection"), "col1");
    touch(&layout.dir(StagingDir::ScdStatic).join("B-a-C.scd"));
    let runner = RecordingRunner::new(0);

    let code = run(
        args(&properties, &["gateway", "col1", "index-scd", "weekly", "bridge"]),
        &runner,
    );

    assert_eq!(code, EXIT_FAILURE);
    assert_eq!(runner.call_count(), 0);
    assert!(layout.dir(StagingDir::ScdStatic).join("B-a-C.scd").exists());
}

#[test]
fn test_gateway_missing_yaml_is_fatal_before_staging() {
    let temp = temp_root();
    let properties = write_properties(temp.path());
    let layout = CollectionLayout::new(temp.path().join("collection"), "col1");
    touch(&layout.dir(StagingDir::ScdStatic).join("B-a-C.scd"));
    let runner = RecordingRunner::new(0);

    let code = run(
        args(&properties, &["gateway", "col1", "index-scd", "static", "bridge"]),
        &runner,
    );

    assert_eq!(code, EXIT_FAILURE);
    assert_eq!(runner.call_count(), 0);
    assert!(layout.dir(StagingDir::ScdStatic).join("B-a-C.scd").exists());
}

#[test]
fn test_gateway_stages_then_runs_processor() {
    let temp = temp_root();
    let properties = write_properties(temp.path());
    let yaml = temp.path().join("config/collection/index-scd/col1.yaml");
    touch(&yaml);
    let layout = CollectionLayout::new(temp.path().join("collection"), "col1");
    touch(&layout.dir(StagingDir::ScdStatic).join("B-a-C.scd"));
    touch(&layout.dir(StagingDir::ScdDynamic).join("B-b-C.scd"));
    let runner = RecordingRunner::new(0);

    let code = run(
        args(&properties, &["gateway", "col1", "index-scd", "static", "bridge"]),
        &runner,
    );

    assert_eq!(code, 0);
    assert_eq!(
        file_names(&layout.dir(StagingDir::ScdIndex)),
        vec!["B-a-C.scd", "B-b-C.scd"]
    );
    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "sh");
    assert_eq!(calls[0].args[1], yaml.display().to_string());
}

#[test]
fn test_processor_exit_code_is_propagated() {
    let temp = temp_root();
    let properties = write_properties(temp.path());
    touch(&temp.path().join("config/collection/bridge/scd/col1.yaml"));
    let runner = RecordingRunner::new(7);

    let code = run(args(&properties, &["bridge", "scd", "dynamic", "col1"]), &runner);

    assert_eq!(code, 7);
    let calls = runner.calls.borrow();
    assert_eq!(
        &calls[0].args[2..],
        &["run".to_string(), "col1".to_string(), "dynamic".to_string()]
    );
}

#[test]
fn test_tea_needs_no_yaml_and_stages_input() {
    let temp = temp_root();
    let properties = write_properties(temp.path());
    let layout = CollectionLayout::new(temp.path().join("collection"), "col1");
    touch(&layout.dir(StagingDir::ScdStatic).join("B-a-C.scd"));
    let runner = RecordingRunner::new(0);

    let code = run(
        args(&properties, &["tea", "col1", "10.1.2.3", "7001"]),
        &runner,
    );

    assert_eq!(code, 0);
    assert_eq!(
        file_names(&layout.dir(StagingDir::ScdTeaBefore)),
        vec!["B-a-C.scd"]
    );
    let calls = runner.calls.borrow();
    assert_eq!(&calls[0].args[1..], &["10.1.2.3", "7001", "col1", "--once"]);
}

#[test]
fn test_dry_run_has_no_side_effects() {
    let temp = temp_root();
    let properties = write_properties(temp.path());
    let layout = CollectionLayout::new(temp.path().join("collection"), "col1");
    let artifact = layout.dir(StagingDir::ScdTeaDone).join("B-a-C.scd");
    touch(&artifact);
    let runner = RecordingRunner::new(0);

    let code = run(
        args(
            &properties,
            &["--dry-run", "--json", "gateway", "col1", "convert-json", "static", "tea"],
        ),
        &runner,
    );

    assert_eq!(code, 0);
    assert_eq!(runner.call_count(), 0);
    assert!(artifact.exists());
    assert!(!layout.dir(StagingDir::ConvertJsonIndex).exists());
}

#[test]
fn test_missing_named_properties_file_fails() {
    let temp = temp_root();
    let missing = temp.path().join("absent.properties");
    let runner = RecordingRunner::new(0);

    let code = run(args(&missing, &["tea", "col1", "10.1.2.3", "7001"]), &runner);

    assert_eq!(code, EXIT_FAILURE);
    assert_eq!(runner.call_count(), 0);
}
