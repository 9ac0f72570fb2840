use pretty_assertions::assert_eq;
use rosterscout::config::Source;
use rosterscout::domain::{DocumentProvider, FetchedPage, PlayerRecord, TeamInfo};
use rosterscout::error::{Result, RosterError};
use rosterscout::extraction::strategies::{CardStrategy, LinkSweepStrategy};
use rosterscout::extraction::RosterExtractor;
use rosterscout::infrastructure::FileSystemStore;
use rosterscout::services::{save_outcomes, BatchExtractor, RosterService, ScrapingService};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}/tests/fixtures/{}.html", env!("CARGO_MANIFEST_DIR"), name))
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).unwrap()
}

/// Serves fixture pages from memory; unknown URLs answer 404.
struct StubProvider {
    pages: HashMap<String, FetchedPage>,
}

impl StubProvider {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    fn page(mut self, url: &str, final_url: &str, fixture_name: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                html: fixture(fixture_name),
                final_url: final_url.to_string(),
            },
        );
        self
    }
}

impl DocumentProvider for StubProvider {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.pages.get(url).cloned().ok_or_else(|| RosterError::Fetch {
            url: url.to_string(),
            status: 404,
        })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: PathBuf) -> T {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn scrape_persists_rosters_and_records_failures() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSystemStore::new(dir.path()));
    let provider = StubProvider::new()
        .page(
            "http://osu.test/roster",
            "https://www.osu.test/sports/football/roster",
            "header_table",
        )
        .page("https://news.test/", "https://news.test/", "no_roster");
    let service = RosterService::new(store, ScrapingService::new(provider), true)
        .with_pause(Duration::ZERO);

    let sources = vec![
        Source::new("http://osu.test/roster"),
        Source::new("https://missing.test/roster"),
        Source {
            url: "https://news.test/".into(),
            slug: Some("news".into()),
        },
    ];
    let manifest = service.process(&sources).await.unwrap();

    assert_eq!(manifest.total_teams, 1);
    assert_eq!(manifest.teams[0].slug, "osu-test");
    assert_eq!(manifest.teams[0].name, "Ohio State Buckeyes");
    assert_eq!(manifest.teams[0].players, 7);
    assert_eq!(manifest.teams[0].strategy, "header table");

    let failed: Vec<&str> = manifest.failures.iter().map(|f| f.url.as_str()).collect();
    assert_eq!(failed, vec!["https://missing.test/roster", "https://news.test/"]);
    assert!(manifest.failures[0].error.contains("404"));
    assert!(manifest.failures[1].error.contains("No roster found"));

    let team: TeamInfo = read_json(dir.path().join("osu-test/team.json"));
    assert_eq!(team.roster_url, "https://www.osu.test/sports/football/roster");
    assert_eq!(team.base_url, "https://www.osu.test");

    let roster: Vec<PlayerRecord> = read_json(dir.path().join("osu-test/roster.json"));
    assert_eq!(roster.len(), 7);
    assert_eq!(roster[0].url, "https://www.osu.test/roster/player/99");

    assert!(dir.path().join("osu-test/page-debug.html").exists());
    assert!(dir.path().join("news/page-debug.html").exists());
    assert!(!dir.path().join("news/roster.json").exists());
    assert!(dir.path().join("manifest.json").exists());
}

#[tokio::test]
async fn scraping_service_surfaces_fetch_failures() {
    let service = ScrapingService::new(StubProvider::new());
    let err = service.scrape("https://missing.test/").await.unwrap_err();

    assert!(err.is_fetch_failure());
    assert!(matches!(err, RosterError::Fetch { status: 404, .. }));
}

#[tokio::test]
async fn scraping_service_with_a_custom_cascade() {
    let provider = StubProvider::new().page(
        "https://hawkeyesports.test/roster",
        "https://hawkeyesports.test/sports/football/roster",
        "links",
    );
    let extractor = RosterExtractor::new(vec![Box::new(CardStrategy), Box::new(LinkSweepStrategy)]);
    let service = ScrapingService::with_extractor(provider, extractor);

    let extraction = service.scrape("https://hawkeyesports.test/roster").await.unwrap();
    assert_eq!(extraction.strategy, "link sweep");
    assert_eq!(
        extraction.roster[1].url,
        "https://hawkeyesports.test/sports/football/roster/player/sam-ortiz"
    );
}

#[test]
fn batch_extraction_keeps_file_order() {
    let files = vec![
        fixture_path("cards"),
        fixture_path("no_roster"),
        fixture_path("heuristic_table"),
        fixture_path("does_not_exist"),
    ];
    let outcomes = BatchExtractor::new("https://team.test/sports/football/roster")
        .with_progress(false)
        .run(&files)
        .unwrap();

    let slugs: Vec<&str> = outcomes.iter().map(|o| o.slug.as_str()).collect();
    assert_eq!(slugs, vec!["cards", "no-roster", "heuristic-table", "does-not-exist"]);
    assert_eq!(outcomes[0].result.as_ref().unwrap().roster.len(), 4);
    assert!(outcomes[1].result.as_ref().unwrap_err().is_no_roster());
    assert_eq!(outcomes[2].result.as_ref().unwrap().strategy, "heuristic table");
    assert!(matches!(outcomes[3].result, Err(RosterError::Io(_))));

    let dir = tempfile::tempdir().unwrap();
    let store = FileSystemStore::new(dir.path());
    let manifest = save_outcomes(&store, outcomes).unwrap();

    assert_eq!(manifest.total_teams, 2);
    assert_eq!(manifest.failures.len(), 2);
    assert!(dir.path().join("cards/roster.json").exists());
    assert!(dir.path().join("heuristic-table/team.json").exists());
    assert!(!dir.path().join("no-roster").exists());

    let written: serde_json::Value = read_json(dir.path().join("manifest.json"));
    assert_eq!(written["totalTeams"], 2);
    assert!(written["lastUpdated"].is_string());
}

#[test]
fn files_sharing_a_name_keep_separate_rosters() {
    let pages = tempfile::tempdir().unwrap();
    let mut files = Vec::new();
    for (team, fixture_name) in [("iowa", "cards"), ("akron", "heuristic_table")] {
        let dir = pages.path().join(team);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roster.html");
        fs::write(&path, fixture(fixture_name)).unwrap();
        files.push(path);
    }

    let outcomes = BatchExtractor::new("https://team.test/sports/football/roster")
        .with_progress(false)
        .run(&files)
        .unwrap();
    let out = tempfile::tempdir().unwrap();
    let manifest = save_outcomes(&FileSystemStore::new(out.path()), outcomes).unwrap();

    let saved: Vec<(&str, usize)> = manifest
        .teams
        .iter()
        .map(|team| (team.slug.as_str(), team.players))
        .collect();
    assert_eq!(saved, vec![("roster", 4), ("roster-2", 5)]);

    let first: Vec<PlayerRecord> = read_json(out.path().join("roster/roster.json"));
    let second: Vec<PlayerRecord> = read_json(out.path().join("roster-2/roster.json"));
    assert_eq!(first[0].name, "Jane Doe");
    assert_eq!(second[4].name, "Tom Brandt");
}

#[tokio::test]
async fn sources_on_one_host_keep_separate_rosters() {
    let dir = tempfile::tempdir().unwrap();
    let provider = StubProvider::new()
        .page(
            "https://athletics.test/football/roster",
            "https://athletics.test/football/roster",
            "header_table",
        )
        .page(
            "https://athletics.test/jv/roster",
            "https://athletics.test/jv/roster",
            "links",
        );
    let service = RosterService::new(
        Arc::new(FileSystemStore::new(dir.path())),
        ScrapingService::new(provider),
        false,
    )
    .with_pause(Duration::ZERO);

    let manifest = service
        .process(&[
            Source::new("https://athletics.test/football/roster"),
            Source::new("https://athletics.test/jv/roster"),
        ])
        .await
        .unwrap();

    let slugs: Vec<&str> = manifest.teams.iter().map(|team| team.slug.as_str()).collect();
    assert_eq!(slugs, vec!["athletics-test", "athletics-test-2"]);

    let varsity: Vec<PlayerRecord> = read_json(dir.path().join("athletics-test/roster.json"));
    let jv: Vec<PlayerRecord> = read_json(dir.path().join("athletics-test-2/roster.json"));
    assert_eq!(varsity.len(), 7);
    assert_eq!(jv.len(), 2);
}
