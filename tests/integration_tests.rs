use csv_tail::{Error, LineBreak, WatchConfig, open_at_end, watch_csv};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tokio_stream::StreamExt;

fn append(path: &Path, content: &str) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
}

/// Helper function to collect output from a stream until it goes quiet
async fn collect_output(
    mut stream: impl StreamExt<Item = csv_tail::Result<Vec<u8>>> + Unpin,
    timeout: Duration,
) -> String {
    let mut output = Vec::new();
    while let Ok(Some(item)) = tokio::time::timeout(timeout, stream.next()).await {
        output.extend_from_slice(&item.unwrap());
    }
    String::from_utf8(output).unwrap()
}

fn config(columns: &[usize]) -> WatchConfig {
    WatchConfig::builder()
        .columns(columns.iter().copied())
        .line_break(LineBreak::Lf)
        .seconds(0)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_watch_selected_columns_across_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metrics.csv");
    std::fs::write(&path, "time,host,value\n").unwrap();

    let stream = watch_csv(&path, config(&[0, 2])).await.unwrap();

    append(&path, "10:00,web-1,0.5\n10:01,web");
    tokio::time::sleep(Duration::from_millis(50)).await;
    append(&path, "-2,0.7\n10:02,db-1,");
    tokio::time::sleep(Duration::from_millis(50)).await;
    append(&path, "1.25\n");

    let output = collect_output(stream, Duration::from_millis(200)).await;
    assert_eq!(output, "10:00,0.5\n10:01,0.7\n10:02,1.25\n");
}

#[tokio::test]
async fn test_watch_passthrough_is_identity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.csv");
    std::fs::write(&path, "").unwrap();

    let stream = watch_csv(&path, config(&[])).await.unwrap();

    append(&path, "a,b,c\r\n");
    tokio::time::sleep(Duration::from_millis(50)).await;
    append(&path, "partial line without terminator");

    let output = collect_output(stream, Duration::from_millis(200)).await;
    assert_eq!(output, "a,b,c\r\npartial line without terminator");
}

#[tokio::test]
async fn test_watch_nonexistent_file_error_case() {
    let result = watch_csv("definitely_nonexistent_file_12345.csv", config(&[1])).await;
    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn test_open_at_end_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = open_at_end(dir.path()).await;
    assert!(matches!(result, Err(Error::NotFound { .. })));
}
