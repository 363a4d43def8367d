//! A report target held open by another program must come back as the
//! recoverable `FileLocked` error, not a generic failure.
//!
//! Exclusive file locks only exist on Windows. On unix a read-only target
//! produces the same permission failure, which is enough to drive the
//! harvest through its recovery path.

#[cfg(windows)]
#[test]
fn test_locked_report_is_recoverable() {
    use quotes_harvest::output::{write_report, OutputError};
    use quotes_harvest::{author_counts, tag_counts, QuoteRecord};
    use std::fs::OpenOptions;
    use std::os::windows::fs::OpenOptionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quotes_report.xlsx");

    // Share mode 0 mimics a spreadsheet program holding the workbook
    let _holder = OpenOptions::new()
        .write(true)
        .create(true)
        .share_mode(0)
        .open(&path)
        .unwrap();

    let records = vec![QuoteRecord::new("Held open", "Someone", "lock")];
    let result = write_report(
        &records,
        &author_counts(&records),
        &tag_counts(&records),
        &path,
    );

    match result {
        Err(err @ OutputError::FileLocked { .. }) => {
            assert!(err.to_string().contains("quotes_report.xlsx"));
        }
        other => panic!("expected FileLocked, got {:?}", other),
    }
}

#[test]
fn test_locked_error_message_is_actionable() {
    use quotes_harvest::output::OutputError;
    use std::path::PathBuf;

    let err = OutputError::FileLocked {
        path: PathBuf::from("output/quotes_report.xlsx"),
    };
    let message = err.to_string();

    assert!(err.is_file_locked());
    assert!(message.contains("output/quotes_report.xlsx"));
    assert!(message.contains("run again"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_harvest_survives_unwritable_report() {
    use quotes_harvest::config::Config;
    use quotes_harvest::output::read_csv;
    use quotes_harvest::pipeline;
    use std::fs::{self, OpenOptions, Permissions};
    use std::os::unix::fs::PermissionsExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("quotes_report.xlsx");
    fs::write(&report_path, b"").unwrap();
    fs::set_permissions(&report_path, Permissions::from_mode(0o444)).unwrap();

    // Root ignores file modes, so there is nothing to exercise
    if OpenOptions::new().write(true).open(&report_path).is_ok() {
        eprintln!("skipping: read-only files are writable for this user");
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <div class="quote">
                    <span class="text">“Held open”</span>
                    <small class="author">Someone</small>
                    <div class="tags"><a class="tag" href="/tag/lock/">lock</a></div>
                </div>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.site.base_url = format!("{}/", server.uri());
    config.scrape.sleep_secs = 0.0;
    config.output.csv_path = dir.path().join("quotes.csv");
    config.output.report_path = report_path.clone();

    let stats = pipeline::run(&config, true).await.unwrap();

    assert!(stats.report_locked);
    assert_eq!(stats.files_written, vec![config.output.csv_path.clone()]);
    let records = read_csv(&config.output.csv_path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "Held open");
    assert_eq!(fs::metadata(&report_path).unwrap().len(), 0);
}
