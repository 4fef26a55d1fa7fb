//! End-to-end staging scenarios for the gateway and tea junctions

use dpr::fs::{CollectionLayout, StagingDir};
use dpr::models::{Operation, Stage};
use dpr::pipeline::TransitionPlanner;

use super::helpers::{file_names, temp_root, touch};

#[test]
fn test_convert_json_after_bridge_moves_both_modes() {
    let temp = temp_root();
    let layout = CollectionLayout::new(temp.path(), "col1");
    let static_file = layout.dir(StagingDir::ScdStatic).join("B-a-C.scd");
    let dynamic_file = layout.dir(StagingDir::ScdDynamic).join("B-b-C.scd");
    touch(&static_file);
    touch(&dynamic_file);

    let summary = TransitionPlanner::default()
        .prepare_for_operation(&layout, Operation::ConvertJson, Some(Stage::Bridge))
        .expect("Should stage bridge output");

    assert_eq!(summary.moved, 2);
    assert_eq!(
        file_names(&layout.dir(StagingDir::ConvertJsonIndex)),
        vec!["B-a-C.scd", "B-b-C.scd"]
    );
    assert!(!static_file.exists());
    assert!(!dynamic_file.exists());
}

#[test]
fn test_index_json_after_convert_vector_consumes_backup() {
    let temp = temp_root();
    let layout = CollectionLayout::new(temp.path(), "col1");
    touch(&layout.dir(StagingDir::ConvertVectorBackup).join("V-x-C.json"));
    touch(&layout.dir(StagingDir::ConvertVectorBackup).join("B-old-C.json"));
    touch(&layout.dir(StagingDir::JsonBackup).join("B-old-C.json"));
    touch(&layout.dir(StagingDir::JsonBackup).join("keep.scd"));

    let summary = TransitionPlanner::default()
        .prepare_for_operation(&layout, Operation::IndexJson, Some(Stage::ConvertVector))
        .expect("Should stage convert-vector output");

    assert_eq!(summary.moved, 1);
    assert_eq!(
        file_names(&layout.dir(StagingDir::JsonIndex)),
        vec!["V-x-C.json"]
    );
    // Only the predecessor's artifacts leave convert-vector/backup; the
    // cleanup targets json/backup, so non-matching json there is kept.
    assert_eq!(
        file_names(&layout.dir(StagingDir::ConvertVectorBackup)),
        vec!["B-old-C.json"]
    );
    // index-json purges json artifacts from its own backup
    assert_eq!(
        file_names(&layout.dir(StagingDir::JsonBackup)),
        vec!["keep.scd"]
    );
    assert_eq!(summary.purged, 1);
}

#[test]
fn test_unsupported_prev_step_moves_nothing() {
    let temp = temp_root();
    let layout = CollectionLayout::new(temp.path(), "col1");
    touch(&layout.dir(StagingDir::ConvertVectorBackup).join("V-x-C.json"));
    touch(&layout.dir(StagingDir::ScdTeaDone).join("B-x-C.scd"));
    touch(&layout.dir(StagingDir::ConvertJsonBackup).join("B-x-C.scd"));

    let summary = TransitionPlanner::default()
        .prepare_for_operation(&layout, Operation::ConvertJson, Some(Stage::ConvertVector))
        .expect("Unsupported pair should not be an error");

    assert_eq!(summary.moved, 0);
    assert_eq!(summary.purged, 0);
    assert!(!layout.dir(StagingDir::ConvertJsonIndex).exists());
    assert!(layout
        .dir(StagingDir::ConvertJsonBackup)
        .join("B-x-C.scd")
        .exists());
}

#[test]
fn test_absent_prev_step_touches_nothing() {
    let temp = temp_root();
    let layout = CollectionLayout::new(temp.path(), "col1");
    touch(&layout.dir(StagingDir::ScdStatic).join("B-a-C.scd"));
    touch(&layout.dir(StagingDir::ScdBackup).join("B-a-C.json"));

    for operation in Operation::ALL {
        let summary = TransitionPlanner::default()
            .prepare_for_operation(&layout, operation, None)
            .expect("Should succeed without a previous step");
        assert_eq!(summary.moved, 0);
        assert_eq!(summary.purged, 0);
    }

    assert!(layout.dir(StagingDir::ScdStatic).join("B-a-C.scd").exists());
    assert!(layout.dir(StagingDir::ScdBackup).join("B-a-C.json").exists());
    assert!(!layout.dir(StagingDir::ScdIndex).exists());
}

#[test]
fn test_only_declared_predecessor_artifacts_are_picked_up() {
    let temp = temp_root();
    let layout = CollectionLayout::new(temp.path(), "col1");
    let backup = layout.dir(StagingDir::ConvertJsonBackup);
    touch(&backup.join("B-a-C.json"));
    touch(&backup.join("V-b-C.json"));

    TransitionPlanner::default()
        .prepare_for_operation(&layout, Operation::IndexJson, Some(Stage::ConvertJson))
        .expect("Should stage convert-json output");

    assert_eq!(
        file_names(&layout.dir(StagingDir::JsonIndex)),
        vec!["B-a-C.json"]
    );
    assert_eq!(file_names(&backup), vec!["V-b-C.json"]);
}

#[test]
fn test_index_scd_after_tea_is_idempotent() {
    let temp = temp_root();
    let layout = CollectionLayout::new(temp.path(), "col1");
    touch(&layout.dir(StagingDir::ScdTeaDone).join("B-a-C.SCD"));
    let planner = TransitionPlanner::default();

    let first = planner
        .prepare_for_operation(&layout, Operation::IndexScd, Some(Stage::Tea))
        .unwrap();
    let after_first = file_names(&layout.dir(StagingDir::ScdIndex));
    let second = planner
        .prepare_for_operation(&layout, Operation::IndexScd, Some(Stage::Tea))
        .unwrap();

    assert_eq!(first.moved, 1);
    assert_eq!(second.moved, 0);
    assert_eq!(after_first, vec!["B-a-C.SCD"]);
    assert_eq!(file_names(&layout.dir(StagingDir::ScdIndex)), after_first);
}

#[test]
fn test_convert_vector_after_bridge_reads_json_modes() {
    let temp = temp_root();
    let layout = CollectionLayout::new(temp.path(), "col1");
    touch(&layout.dir(StagingDir::JsonStatic).join("B-s-C.json"));
    touch(&layout.dir(StagingDir::JsonDynamic).join("B-d-C.json"));
    touch(&layout.dir(StagingDir::JsonDynamic).join("B-d-C.scd"));

    let summary = TransitionPlanner::default()
        .prepare_for_operation(&layout, Operation::ConvertVector, Some(Stage::Bridge))
        .unwrap();

    assert_eq!(summary.moved, 2);
    assert_eq!(
        file_names(&layout.dir(StagingDir::ConvertVectorIndex)),
        vec!["B-d-C.json", "B-s-C.json"]
    );
    assert_eq!(
        file_names(&layout.dir(StagingDir::JsonDynamic)),
        vec!["B-d-C.scd"]
    );
}

#[test]
fn test_tea_junction_stages_bridge_output_and_clears_tea_done() {
    let temp = temp_root();
    let layout = CollectionLayout::new(temp.path(), "col1");
    touch(&layout.dir(StagingDir::ScdStatic).join("B-s-C.scd"));
    touch(&layout.dir(StagingDir::ScdDynamic).join("B-d-C.scd"));
    touch(&layout.dir(StagingDir::ScdTeaDone).join("B-prev-C.scd"));

    let summary = TransitionPlanner::default()
        .prepare_for_tea(&layout)
        .expect("Should stage tea input");

    assert_eq!(summary.moved, 2);
    assert_eq!(summary.purged, 1);
    assert_eq!(
        file_names(&layout.dir(StagingDir::ScdTeaBefore)),
        vec!["B-d-C.scd", "B-s-C.scd"]
    );
    assert!(file_names(&layout.dir(StagingDir::ScdTeaDone)).is_empty());
}
