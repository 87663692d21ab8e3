use ablm_test_data::ResultFixture;
use assert_cmd::Command;

#[test]
fn per_position_writes_summary_and_figures() {
    let fixture = ResultFixture::paired_run_01().with_malformed_heavy();
    let (results_dir, _dir) = fixture.create_temp_dir().unwrap();
    let out = tempfile::tempdir().unwrap();

    Command::cargo_bin("ablm-eval")
        .unwrap()
        .args([
            "per-position",
            "--results-dir",
            results_dir.to_str().unwrap(),
            "--output-dir",
            out.path().to_str().unwrap(),
            "--task-str",
            "per_position_inference",
        ])
        .assert()
        .success();

    let summary = out.path().join("results-summary_per_position_inference.csv");
    let text = std::fs::read_to_string(&summary).unwrap();
    assert!(text.starts_with("model,mutated,CDRH3_median_loss,CDRH3_accuracy"));
    assert!(text.contains("balm-base"));
    assert!(text.contains("balm-shuffled"));

    for name in [
        "combined-per_position_inference-results_mutated_median_loss.svg",
        "combined-per_position_inference-results_mutated_accuracy.svg",
        "combined-per_position_inference-results_unmutated_median_loss.svg",
        "combined-per_position_inference-results_unmutated_accuracy.svg",
    ] {
        let figure = out.path().join(name);
        assert!(figure.exists(), "missing figure {name}");
        assert!(std::fs::metadata(&figure).unwrap().len() > 0);
    }
}

#[test]
fn per_position_fails_on_empty_results_dir() {
    let empty = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    Command::cargo_bin("ablm-eval")
        .unwrap()
        .args([
            "per-position",
            "--results-dir",
            empty.path().to_str().unwrap(),
            "--output-dir",
            out.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("no input files found"));
}

#[test]
fn check_model_rejects_unknown_task() {
    let model_dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("ablm-eval")
        .unwrap()
        .args([
            "check-model",
            "--model-path",
            model_dir.path().to_str().unwrap(),
            "--task",
            "ner",
            "--cpu",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("unsupported task: ner"));
}
