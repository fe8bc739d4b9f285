use http::Method;
use std::fs;
use test_case::test_case;
use www_pack_loader::{
    pack::{Pack, Resolution},
    route_table::RouteTable,
};
use www_pack_packer::{
    Error,
    pipeline::{Mode, PipelineOptions, Report, run},
    route_path::RouteKey,
    route_table::RouteTableOptions,
};
use www_pack_tests::{gunzip, logger_init, source_tree_create};

fn embedded(
    output_file: &std::path::Path,
    route_key: RouteKey,
) -> Mode {
    Mode::Embedded {
        output_file: output_file.to_path_buf(),
        options: RouteTableOptions {
            route_key,
            ..RouteTableOptions::default()
        },
    }
}

#[test]
fn single_file_produces_single_route() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(&source, &[("index.html", b"<h1>hi</h1>")]).unwrap();
    let output_file = workspace.path().join("static_routes.h");

    let report = run(
        &source,
        &embedded(&output_file, RouteKey::default()),
        &PipelineOptions::default(),
    )
    .unwrap();
    assert!(matches!(report, Report::Embedded(_)));

    let route_table = RouteTable::from_path(&output_file).unwrap();
    assert_eq!(route_table.routes.len(), 1);

    let route = &route_table.routes[0];
    assert_eq!(route.path, "/index.html");
    assert_eq!(route.method, "GET");
    assert_eq!(route.handler, "serve_static");
    assert_eq!(&*gunzip(&route.content_gzip).unwrap(), b"<h1>hi</h1>");
}

#[test]
fn every_file_is_routed_by_relative_path() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(
        &source,
        &[
            ("index.html", b"<h1>hi</h1>"),
            ("css/app.css", b"body{}"),
            ("js/lib/app.js", b"alert(1)"),
            ("img/logo.png", b"\x89PNG\r\n\x1a\n\x00\xff"),
            ("empty.txt", b""),
        ],
    )
    .unwrap();
    let output_file = workspace.path().join("static_routes.h");

    run(
        &source,
        &embedded(&output_file, RouteKey::RelativePath),
        &PipelineOptions::default(),
    )
    .unwrap();

    let route_table = RouteTable::from_path(&output_file).unwrap();
    let mut routes = route_table
        .routes
        .iter()
        .map(|route| {
            (
                route.path.as_str(),
                gunzip(&route.content_gzip).unwrap().into_vec(),
            )
        })
        .collect::<Vec<_>>();
    routes.sort();

    assert_eq!(
        routes,
        vec![
            ("/css/app.css", b"body{}".to_vec()),
            ("/empty.txt", b"".to_vec()),
            ("/img/logo.png", b"\x89PNG\r\n\x1a\n\x00\xff".to_vec()),
            ("/index.html", b"<h1>hi</h1>".to_vec()),
            ("/js/lib/app.js", b"alert(1)".to_vec()),
        ]
    );
}

#[test]
fn same_file_names_do_not_collide_with_relative_path_key() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(&source, &[("a/x.txt", b"A"), ("b/x.txt", b"B")]).unwrap();
    let output_file = workspace.path().join("static_routes.h");

    run(
        &source,
        &embedded(&output_file, RouteKey::RelativePath),
        &PipelineOptions::default(),
    )
    .unwrap();

    let route_table = RouteTable::from_path(&output_file).unwrap();
    for (path, content) in [("/a/x.txt", b"A"), ("/b/x.txt", b"B")] {
        match route_table.resolve(&Method::GET, path).unwrap() {
            Resolution::Found(file) => assert_eq!(&*file.content().unwrap(), content),
            other => panic!("{path} resolved to {other:?}"),
        }
    }
    assert_eq!(
        route_table.resolve(&Method::GET, "/x.txt").unwrap(),
        Resolution::NotFound
    );
}

#[test]
fn same_file_names_are_rejected_with_file_name_key() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(&source, &[("a/x.txt", b"A"), ("b/x.txt", b"B")]).unwrap();
    let output_file = workspace.path().join("static_routes.h");

    let error = run(
        &source,
        &embedded(&output_file, RouteKey::FileName),
        &PipelineOptions::default(),
    )
    .unwrap_err();

    match error {
        Error::RouteCollision { path, .. } => assert_eq!(path, "/x.txt"),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!output_file.exists());
}

#[test_case(RouteKey::RelativePath)]
#[test_case(RouteKey::FileName)]
fn empty_source_produces_empty_table(route_key: RouteKey) {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(&source, &[]).unwrap();
    let output_file = workspace.path().join("static_routes.h");

    let report = run(
        &source,
        &embedded(&output_file, route_key),
        &PipelineOptions::default(),
    )
    .unwrap();

    match report {
        Report::Embedded(report) => assert!(report.route_paths.is_empty()),
        other => panic!("unexpected report {other:?}"),
    }
    assert!(RouteTable::from_path(&output_file).unwrap().routes.is_empty());
}

#[test]
fn generated_table_is_reproducible() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(
        &source,
        &[
            ("index.html", b"<h1>hi</h1>"),
            ("css/app.css", b"body{}"),
            ("b.txt", b"b"),
            ("a.txt", b"a"),
        ],
    )
    .unwrap();
    let output_file_first = workspace.path().join("first.h");
    let output_file_second = workspace.path().join("second.h");

    for output_file in [&output_file_first, &output_file_second] {
        run(
            &source,
            &embedded(output_file, RouteKey::default()),
            &PipelineOptions::default(),
        )
        .unwrap();
    }

    assert_eq!(
        fs::read(&output_file_first).unwrap(),
        fs::read(&output_file_second).unwrap()
    );
}

#[test]
fn previous_table_is_replaced() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(&source, &[("index.html", b"<h1>hi</h1>")]).unwrap();
    let output_file = workspace.path().join("static_routes.h");
    fs::write(&output_file, "stale content").unwrap();

    run(
        &source,
        &embedded(&output_file, RouteKey::default()),
        &PipelineOptions::default(),
    )
    .unwrap();

    let text = fs::read_to_string(&output_file).unwrap();
    assert!(!text.contains("stale content"));
    assert_eq!(RouteTable::parse(&text).unwrap().routes.len(), 1);
}

#[test]
fn missing_source_fails() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let output_file = workspace.path().join("static_routes.h");

    let error = run(
        &workspace.path().join("missing"),
        &embedded(&output_file, RouteKey::default()),
        &PipelineOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(error, Error::FileSystem { .. }));
    assert!(!output_file.exists());
}
