use http::{Method, StatusCode, header};
use std::path::Path;
use test_case::test_case;
use www_pack_loader::{
    directory::Directory,
    pack::Pack,
    responder::{CACHE_CONTROL, Responder},
    route_table::RouteTable,
};
use www_pack_packer::pipeline::{Mode, PipelineOptions, run};
use www_pack_tests::{gunzip, logger_init, source_tree_create};

const SOURCE: &[(&str, &[u8])] = &[
    ("index.html", b"<h1>hi</h1>"),
    ("css/app.css", b"body{}"),
    ("js/app.js", b"alert(1)"),
    ("favicon.ico", b"\x00\x00\x01\x00"),
];

fn serves_source<P>(pack: &P)
where
    P: Pack,
{
    let responder = Responder::new(pack);

    for (relative_path, content) in SOURCE {
        let path = format!("/{relative_path}");
        let response = responder.respond_flatten(&Method::GET, &path);

        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");
        assert_eq!(response.headers()[header::CACHE_CONTROL], CACHE_CONTROL);
        assert_eq!(
            response.headers()[header::CONTENT_LENGTH],
            response.body().len().to_string()
        );
        assert_eq!(&*gunzip(response.body()).unwrap(), *content, "{path}");
    }

    let content_types = [
        ("/index.html", Some("text/html")),
        ("/css/app.css", Some("text/css")),
        ("/js/app.js", Some("text/javascript")),
        ("/favicon.ico", None),
    ];
    for (path, content_type) in content_types {
        let response = responder.respond_flatten(&Method::GET, path);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .map(|value| value.to_str().unwrap()),
            content_type,
            "{path}"
        );
    }

    let response = responder.respond_flatten(&Method::POST, "/index.html");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "0");
    assert!(response.body().is_empty());

    for path in ["/missing.html", "/css", "/", "/index.html.gz", "/../www/index.html"] {
        let response = responder.respond_flatten(&Method::GET, path);
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

fn source_create(workspace: &Path) -> std::path::PathBuf {
    let source = workspace.join("www");
    source_tree_create(&source, SOURCE).unwrap();
    source
}

#[test]
fn route_table_serves_source() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = source_create(workspace.path());
    let output_file = workspace.path().join("generated").join("static_routes.h");

    run(
        &source,
        &Mode::Embedded {
            output_file: output_file.clone(),
            options: Default::default(),
        },
        &PipelineOptions::default(),
    )
    .unwrap();

    let route_table = RouteTable::from_path(&output_file).unwrap();
    serves_source(&route_table);
}

#[test]
fn directory_serves_source() {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = source_create(workspace.path());
    let destination = workspace.path().join("data").join("www");

    run(
        &source,
        &Mode::Filesystem {
            destination: destination.clone(),
            options: Default::default(),
        },
        &PipelineOptions::default(),
    )
    .unwrap();

    let directory = Directory::new(destination);
    serves_source(&directory);
}

#[test_case("/my%20file.txt", "my file.txt"; "space")]
#[test_case("/%C3%A9t%C3%A9.txt", "été.txt"; "non ascii")]
fn route_table_serves_percent_encoded_path(
    path: &str,
    file_name: &str,
) {
    logger_init();
    let workspace = tempfile::tempdir().unwrap();
    let source = workspace.path().join("www");
    source_tree_create(&source, &[(file_name, b"content")]).unwrap();
    let output_file = workspace.path().join("static_routes.h");

    run(
        &source,
        &Mode::Embedded {
            output_file: output_file.clone(),
            options: Default::default(),
        },
        &PipelineOptions::default(),
    )
    .unwrap();

    let route_table = RouteTable::from_path(&output_file).unwrap();
    let response = Responder::new(&route_table).respond_flatten(&Method::GET, path);
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&*gunzip(response.body()).unwrap(), b"content");
}
