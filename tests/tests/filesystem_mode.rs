use std::{collections::BTreeMap, fs, path::PathBuf};
use test_case::test_case;
use www_pack_packer::{
    Error,
    filesystem::{FilesystemOptions, PackReport, Strategy},
    pipeline::{Mode, PipelineOptions, Report, run},
};
use www_pack_tests::{gunzip, logger_init, source_tree_create, tree_snapshot};

fn filesystem(
    destination: &std::path::Path,
    strategy: Strategy,
) -> Mode {
    Mode::Filesystem {
        destination: destination.to_path_buf(),
        options: FilesystemOptions { strategy },
    }
}

fn pack_report(report: Report) -> PackReport {
    match report {
        Report::Filesystem(report) => report,
        other => panic!("unexpected report {other:?}"),
    }
}

fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}

#[test_case(Strategy::Wipe)]
#[test_case(Strategy::Sync)]
fn single_file_is_mirrored_with_suffix(strategy: Strategy) {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(&source, &[("css/app.css", b"body{}")]).unwrap();
    let destination = workspace.path().join("data");

    let report = pack_report(
        run(
            &source,
            &filesystem(&destination, strategy),
            &PipelineOptions::default(),
        )
        .unwrap(),
    );
    assert_eq!(report.added, vec![PathBuf::from("css/app.css.gz")]);

    let snapshot = tree_snapshot(&destination).unwrap();
    assert_eq!(
        snapshot.keys().collect::<Vec<_>>(),
        vec![&PathBuf::from("css/app.css.gz")]
    );
    assert_eq!(
        &*gunzip(&snapshot[&PathBuf::from("css/app.css.gz")]).unwrap(),
        b"body{}"
    );
}

#[test_case(Strategy::Wipe)]
#[test_case(Strategy::Sync)]
fn destination_reflects_exactly_current_source(strategy: Strategy) {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(
        &source,
        &[
            ("index.html", b"<h1>hi</h1>"),
            ("css/app.css", b"body{}"),
            ("old/gone.js", b"gone()"),
        ],
    )
    .unwrap();
    let destination = workspace.path().join("data");
    run(
        &source,
        &filesystem(&destination, strategy),
        &PipelineOptions::default(),
    )
    .unwrap();

    // leftover unrelated to any asset
    fs::write(destination.join("stray.txt"), "stray").unwrap();
    // source changes between runs
    fs::remove_dir_all(source.join("old")).unwrap();
    fs::write(source.join("css").join("app.css"), "body{margin:0}").unwrap();
    fs::write(source.join("new.js"), "new()").unwrap();

    let report = pack_report(
        run(
            &source,
            &filesystem(&destination, strategy),
            &PipelineOptions::default(),
        )
        .unwrap(),
    );
    assert_eq!(sorted(report.added), vec![PathBuf::from("new.js.gz")]);
    assert_eq!(sorted(report.changed), vec![PathBuf::from("css/app.css.gz")]);
    assert_eq!(sorted(report.unchanged), vec![PathBuf::from("index.html.gz")]);
    assert_eq!(
        sorted(report.removed),
        vec![PathBuf::from("old/gone.js.gz"), PathBuf::from("stray.txt")]
    );

    let snapshot = tree_snapshot(&destination)
        .unwrap()
        .into_iter()
        .map(|(path, content_gzip)| (path, gunzip(&content_gzip).unwrap().into_vec()))
        .collect::<BTreeMap<_, _>>();
    assert_eq!(
        snapshot,
        BTreeMap::from([
            (PathBuf::from("css/app.css.gz"), b"body{margin:0}".to_vec()),
            (PathBuf::from("index.html.gz"), b"<h1>hi</h1>".to_vec()),
            (PathBuf::from("new.js.gz"), b"new()".to_vec()),
        ])
    );
    assert!(!destination.join("old").exists());
}

#[test_case(Strategy::Wipe)]
#[test_case(Strategy::Sync)]
fn repeated_run_gives_identical_tree(strategy: Strategy) {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(
        &source,
        &[
            ("index.html", b"<h1>hi</h1>"),
            ("css/app.css", b"body{}"),
            ("img/logo.png", b"\x89PNG\r\n\x1a\n"),
        ],
    )
    .unwrap();
    let destination = workspace.path().join("data");

    run(
        &source,
        &filesystem(&destination, strategy),
        &PipelineOptions::default(),
    )
    .unwrap();
    let snapshot_first = tree_snapshot(&destination).unwrap();

    let report = pack_report(
        run(
            &source,
            &filesystem(&destination, strategy),
            &PipelineOptions::default(),
        )
        .unwrap(),
    );
    let snapshot_second = tree_snapshot(&destination).unwrap();

    assert_eq!(snapshot_first, snapshot_second);
    assert!(report.added.is_empty());
    assert!(report.changed.is_empty());
    assert!(report.removed.is_empty());
    assert_eq!(report.unchanged.len(), 3);
}

#[test_case(Strategy::Wipe)]
#[test_case(Strategy::Sync)]
fn empty_source_empties_destination(strategy: Strategy) {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(&source, &[]).unwrap();
    let destination = workspace.path().join("data");
    source_tree_create(&destination, &[("stale/old.html.gz", b"old")]).unwrap();

    let report = pack_report(
        run(
            &source,
            &filesystem(&destination, strategy),
            &PipelineOptions::default(),
        )
        .unwrap(),
    );

    assert_eq!(report.removed, vec![PathBuf::from("stale/old.html.gz")]);
    assert!(destination.is_dir());
    assert!(fs::read_dir(&destination).unwrap().next().is_none());
}

#[test]
fn empty_source_creates_empty_destination() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(&source, &[]).unwrap();
    let destination = workspace.path().join("data");

    let report = pack_report(
        run(
            &source,
            &filesystem(&destination, Strategy::default()),
            &PipelineOptions::default(),
        )
        .unwrap(),
    );

    assert_eq!(report, PackReport::default());
    assert!(tree_snapshot(&destination).unwrap().is_empty());
}

#[test]
fn destination_being_file_fails() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(&source, &[("index.html", b"<h1>hi</h1>")]).unwrap();
    let destination = workspace.path().join("data");
    fs::write(&destination, "not a directory").unwrap();

    let error = run(
        &source,
        &filesystem(&destination, Strategy::default()),
        &PipelineOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(error, Error::FileSystem { .. }));
    assert_eq!(fs::read_to_string(&destination).unwrap(), "not a directory");
}
