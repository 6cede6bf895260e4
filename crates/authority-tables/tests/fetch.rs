//! Fallback file and HTTP loading of the authority tables.

use std::time::Duration;

use authority_tables::{
    parse_line_table, AuthorityTables, ResourceFetcher, TableKind, TableParseError, TableSources,
};
use test_utils::{fixture_table_dir, init_tracing, write_fixture, TableServer, PROJECTS};

/// Nothing listens on the discard port.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn fetcher() -> ResourceFetcher {
    ResourceFetcher::new(Duration::from_secs(2)).unwrap()
}

fn lines(text: &str) -> Result<Vec<String>, TableParseError> {
    Ok(text.lines().map(String::from).collect())
}

// ============================================================================
// load_resource
// ============================================================================

#[test]
fn test_valid_fallback_skips_network() {
    init_tracing();
    let server = TableServer::start([("/projects.txt", "FROM NETWORK")]);
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "projects.txt", "FROM FILE");

    let loaded = fetcher().load_resource(&server.url("/projects.txt"), Some(&path), lines);

    assert_eq!(loaded, Some(vec!["FROM FILE".to_string()]));
    assert_eq!(server.request_count(), 0);
}

#[test]
fn test_unreadable_fallback_uses_network() {
    init_tracing();
    let server = TableServer::start([("/projects.txt", "FROM NETWORK")]);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does_not_exist.txt");

    let loaded = fetcher().load_resource(&server.url("/projects.txt"), Some(&missing), lines);

    assert_eq!(loaded, Some(vec!["FROM NETWORK".to_string()]));
    assert_eq!(server.request_count(), 1);
    assert_eq!(server.requested_paths(), vec!["/projects.txt".to_string()]);
}

#[test]
fn test_not_found_yields_none() {
    let server = TableServer::start(Vec::<(String, String)>::new());
    let loaded = fetcher().load_resource(&server.url("/projects.txt"), None, lines);
    assert_eq!(loaded, None);
    assert_eq!(server.request_count(), 1);
}

#[test]
fn test_both_sources_unavailable_yields_none() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("projects.txt");
    let loaded = fetcher().load_resource(
        &format!("{}/projects.txt", UNREACHABLE),
        Some(&missing),
        lines,
    );
    assert_eq!(loaded, None);
}

#[test]
fn test_parse_failure_yields_none() {
    let server = TableServer::start([("/seanames.xml", "<seaname><seaname>Unclosed")]);
    let loaded = fetcher().load_resource(&server.url("/seanames.xml"), None, |text| {
        TableKind::SeaName.parse(text)
    });
    assert_eq!(loaded, None);
}

// ============================================================================
// AuthorityTables::load
// ============================================================================

#[test]
fn test_load_from_fallback_files() {
    init_tracing();
    let dir = fixture_table_dir();
    let sources = TableKind::ALL.into_iter().fold(
        TableSources::default()
            .with_base_url(UNREACHABLE)
            .with_sea_names_url(format!("{}/seanames.xml", UNREACHABLE)),
        |sources, kind| sources.with_fallback(kind, dir.path().join(kind.file_name())),
    );

    let tables = AuthorityTables::load(&sources, &fetcher());

    assert!(tables.contains(TableKind::Project, "MARACOOS").unwrap());
    assert!(tables.contains(TableKind::Instrument, "Sea-Bird GCTD").unwrap());
    assert!(tables.contains(TableKind::SeaName, "Mid-Atlantic Bight").unwrap());
    assert!(!tables.contains(TableKind::Platform, "Unknown").unwrap());
}

#[test]
fn test_load_over_http() {
    let server = TableServer::with_fixture_tables();
    let sources = TableSources::default()
        .with_base_url(format!("{}/", server.base_url()))
        .with_sea_names_url(server.url("/seanames.xml"));

    let tables = AuthorityTables::load(&sources, &fetcher());

    assert_eq!(server.request_count(), TableKind::ALL.len());
    let mut paths = server.requested_paths();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "/institutions.txt",
            "/instruments.txt",
            "/platforms.txt",
            "/projects.txt",
            "/seanames.xml",
        ]
    );
    assert_eq!(tables.get(TableKind::Project).unwrap(), &parse_line_table(PROJECTS));
}

#[test]
fn test_partial_load_leaves_missing_tables_unavailable() {
    let server = TableServer::start([("/projects.txt", PROJECTS)]);
    let dir = tempfile::tempdir().unwrap();
    let sea_names = write_fixture(dir.path(), "seanames.xml", "<seaname></seaname>");
    let sources = TableSources::default()
        .with_base_url(server.base_url())
        .with_sea_names_url(format!("{}/seanames.xml", UNREACHABLE))
        .with_fallback(TableKind::SeaName, sea_names)
        .with_timeout(Duration::from_millis(500));

    let fetcher = ResourceFetcher::new(sources.timeout).unwrap();
    let tables = AuthorityTables::load(&sources, &fetcher);

    assert!(tables.is_available(TableKind::Project));
    assert!(tables.is_available(TableKind::SeaName));
    assert!(tables.get(TableKind::SeaName).unwrap().is_empty());
    for kind in [TableKind::Platform, TableKind::Instrument, TableKind::Institution] {
        assert!(!tables.is_available(kind));
        assert_eq!(
            tables.get(kind).unwrap_err().to_string(),
            format!("Was unable to fetch {} table", kind)
        );
    }
}
