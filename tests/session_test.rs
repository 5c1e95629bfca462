// Session tests: the flow behind the interactive menu
use sentiment_core::report::format_score;
use sentiment_core::{ReportFormat, ReportTarget, SentimentError, Session, Settings, Source};
use std::path::PathBuf;

fn fixture(name: &str) -> Source {
    Source::File(
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name),
    )
}

#[test]
fn test_analysis_without_text_is_refused() {
    let session = Session::default();
    assert!(session.text().is_none());
    assert!(matches!(session.analyze(), Err(SentimentError::NoText)));
}

#[test]
fn test_default_output_is_out_txt() {
    let session = Session::default();
    assert_eq!(
        session.output(),
        &ReportTarget::File(PathBuf::from("./out.txt"))
    );
}

#[tokio::test]
async fn test_empty_text_is_refused() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut session = Session::default();
    session
        .load_text(&Source::File(file.path().to_path_buf()))
        .await
        .unwrap();
    assert!(matches!(session.analyze(), Err(SentimentError::NoText)));
}

#[tokio::test]
async fn test_failed_text_load_keeps_previous_text() {
    let mut session = Session::default();
    session.load_text(&fixture("review.txt")).await.unwrap();
    let before = session.text().map(str::to_string);

    let err = session
        .load_text(&fixture("missing.txt"))
        .await
        .unwrap_err();
    assert!(matches!(err, SentimentError::Source(_)));
    assert_eq!(session.text().map(str::to_string), before);
}

#[tokio::test]
async fn test_failed_lexicon_load_keeps_previous_lexicon() {
    let session = Session::default();
    session.load_lexicon(fixture("extra.csv")).await.unwrap();

    let err = session
        .load_lexicon(fixture("missing.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, SentimentError::Lexicon(_)));
    assert_eq!(session.lexicon().len(), 2);
    assert_eq!(session.lexicon().lookup("awful"), -3.0);
}

#[tokio::test]
async fn test_lexicon_is_ready_after_load_returns() {
    let session = Session::default();
    let load = session.load_lexicon(fixture("lexicon.csv")).await.unwrap();
    assert_eq!(load.applied(), session.lexicon().len());
    assert_eq!(session.lexicon().lookup("terrible"), -2.5);
}

#[tokio::test]
async fn test_execute_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.txt");

    let mut session = Session::new(Settings::default());
    session.load_lexicon(fixture("lexicon.csv")).await.unwrap();
    session.load_text(&fixture("review.txt")).await.unwrap();
    session.set_output(ReportTarget::File(out.clone()));

    let report = session.execute(ReportFormat::Text).unwrap();

    // excellent(2.5) bad(-1.0) terrible(-2.5); `good.` keeps its dot and misses.
    assert_eq!(report.analysis.matched_count, 3);
    assert_eq!(report.score(), -1.0 / 3.0);

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, report.render());
    assert!(written.starts_with("Analyzed Text: This movie was good.\nThe acting"));
    assert!(written.ends_with(&format!("Average Sentiment Score: {}\n", format_score(-1.0 / 3.0))));
}

#[tokio::test]
async fn test_execute_overwrites_existing_report() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.json");
    std::fs::write(&out, "stale contents that are longer than the new report ".repeat(20))
        .unwrap();

    let mut session = Session::default();
    session.load_lexicon(fixture("extra.csv")).await.unwrap();
    session.load_text(&fixture("review.txt")).await.unwrap();
    session.set_output(ReportTarget::File(out.clone()));
    session.execute(ReportFormat::Json).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["analysis"]["matched_count"], 0);
    assert_eq!(json["analysis"]["score"], 0.0);
}

#[tokio::test]
async fn test_report_to_unwritable_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::default();
    session.load_text(&fixture("review.txt")).await.unwrap();
    session.set_output(ReportTarget::File(dir.path().join("no/such/dir/out.txt")));

    assert!(matches!(
        session.execute(ReportFormat::Text),
        Err(SentimentError::ReportWrite { .. })
    ));
}
