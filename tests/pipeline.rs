mod common;

use common::*;
use tempfile::tempdir;
use yti_comments::CommentsError;
use yti_comments::config::Config;
use yti_comments::io::dataset::{Dataset, save_dataset};
use yti_comments::localization::MessageCatalog;
use yti_comments::pipeline;

fn write_dataset(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("dataset.json");
    let dataset = Dataset {
        rounds: vec![discussed_round()],
        users: users(),
    };
    save_dataset(&path, &dataset).expect("dataset written");
    path
}

#[test]
fn exported_workbook_reads_back() {
    let temp_dir = tempdir().expect("temporary directory");
    let dataset = write_dataset(temp_dir.path());
    let output = temp_dir.path().join("round.xlsx");

    pipeline::export_round_to_file(
        &dataset,
        &ROUND_ID.to_string(),
        Some("en"),
        &output,
        MessageCatalog::builtin("en"),
        Config::default(),
    )
    .expect("round exported");

    let tables = pipeline::inspect_workbook(&output).expect("workbook read");
    let shape: Vec<(&str, usize, usize)> = tables
        .iter()
        .map(|table| (table.sheet_name.as_str(), table.columns.len(), table.rows.len()))
        .collect();
    assert_eq!(
        shape,
        vec![("Comment round", 13, 1), ("Resources", 11, 2), ("Comments", 10, 9)]
    );

    let comments = &tables[2];
    assert_eq!(comments.rows[3].cells[4], "comment 3");
    assert_eq!(comments.rows[0].cells[0], "EN: Municipality\nFI: Kunta\nlocalName: municipality");
}

#[test]
fn thread_results_come_from_dataset() {
    let temp_dir = tempdir().expect("temporary directory");
    let dataset = write_dataset(temp_dir.path());

    let (results, text) = pipeline::thread_results(
        &dataset,
        &THREAD_A.to_string(),
        Some("sv"),
        MessageCatalog::builtin("en"),
        Config::default(),
    )
    .expect("results computed");
    assert_eq!(results.len(), 2);
    assert_eq!(text, "Utkast: 1 (33.3 %)\nGiltig: 2 (66.7 %)");
}

#[test]
fn malformed_identifier_is_not_acceptable() {
    let temp_dir = tempdir().expect("temporary directory");
    let dataset = write_dataset(temp_dir.path());

    let error = pipeline::thread_results(
        &dataset,
        "not-a-uuid",
        None,
        MessageCatalog::default(),
        Config::default(),
    )
    .expect_err("identifier rejected");
    assert!(matches!(error, CommentsError::NotAcceptable(_)));
}

#[test]
fn missing_dataset_is_reported() {
    let temp_dir = tempdir().expect("temporary directory");
    let error = pipeline::thread_results(
        &temp_dir.path().join("absent.json"),
        &THREAD_A.to_string(),
        None,
        MessageCatalog::default(),
        Config::default(),
    )
    .expect_err("dataset missing");
    assert!(matches!(error, CommentsError::MissingInput(_)));
}
