//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for the Douyu directory host and
//! run the full fetch → extract → aggregate → write cycle end-to-end.

use douyu_playlist::config::{Config, ExtractorConfig, FetchConfig, Job, OutputConfig};
use douyu_playlist::crawler::{run_harvest, Harvester};
use douyu_playlist::output::PLAYLIST_HEADER;
use douyu_playlist::HarvestError;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RELAY: &str = "http://192.168.1.43:81/douyu.php?id=";
const TEST_AGENT: &str = "DouyuPlaylistTest/1.0";

/// Creates a test configuration pointing every job at the mock server
fn create_test_config(base_url: &str, jobs: &[(&str, &str)], output: &TempDir) -> Config {
    Config {
        fetch: FetchConfig {
            timeout_secs: 2,
            launch_delay_ms: 20,
            user_agent: TEST_AGENT.to_string(),
        },
        extractor: ExtractorConfig::default(),
        output: OutputConfig {
            path: output.path().join("douyu.txt").to_string_lossy().into_owned(),
            relay_template: RELAY.to_string(),
        },
        jobs: jobs
            .iter()
            .map(|(page, category)| Job::new(format!("{}{}", base_url, page), *category))
            .collect(),
    }
}

/// Renders a directory page listing the given (room link, title) cards
fn directory_page(cards: &[(&str, &str)]) -> String {
    let items: String = cards
        .iter()
        .map(|(href, title)| {
            format!(
                r#"<li class="layout-Cover-item">
                    <a class="DyListCover-wrap" href="{}">
                        <div class="DyListCover-imgWrap"><img src="/cover.jpg"></div>
                        <div class="DyListCover-content">
                            <h3 class="DyListCover-intro" title="{}">{}</h3>
                        </div>
                    </a>
                </li>"#,
                href, title, title
            )
        })
        .collect();

    format!(
        r#"<html><head><title>一起看 - 斗鱼直播</title></head>
        <body><ul class="layout-Cover-list">{}</ul></body></html>"#,
        items
    )
}

async fn mount_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .and(header("user-agent", TEST_AGENT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn sorted_data_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = content.lines().skip(1).map(str::to_string).collect();
    lines.sort();
    lines
}

#[tokio::test]
async fn test_full_harvest_multiple_categories() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/directory/subCate/yqk/290",
        directory_page(&[("/9999", "陪你看电影"), ("/288016", "深夜放映厅")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/directory/subCate/yqk/2827",
        directory_page(&[("/74751", "周星驰合集")]),
    )
    .await;

    let config = create_test_config(
        &mock_server.uri(),
        &[
            ("/directory/subCate/yqk/290", "陪看"),
            ("/directory/subCate/yqk/2827", "喜剧"),
        ],
        &output,
    );

    let report = run_harvest(config).await.expect("harvest failed");
    let content = std::fs::read_to_string(&report.written.path).unwrap();

    assert_eq!(report.stats.jobs_harvested, 2);
    assert_eq!(report.stats.entries, 3);
    assert_eq!(content.lines().next(), Some(PLAYLIST_HEADER));
    assert_eq!(
        sorted_data_lines(&content),
        vec![
            format!("周星驰合集,{}74751", RELAY),
            format!("深夜放映厅,{}288016", RELAY),
            format!("陪你看电影,{}9999", RELAY),
        ]
    );
}

#[tokio::test]
async fn test_failing_page_is_isolated() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(&mock_server, "/ok", directory_page(&[("/1", "s1")])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        &mock_server.uri(),
        &[("/broken", "综合"), ("/ok", "喜剧")],
        &output,
    );

    let report = run_harvest(config).await.unwrap();
    let content = std::fs::read_to_string(&report.written.path).unwrap();

    assert_eq!(report.stats.network_failures, 1);
    assert_eq!(report.stats.jobs_harvested, 1);
    assert_eq!(sorted_data_lines(&content), vec![format!("s1,{}1", RELAY)]);
}

#[tokio::test]
async fn test_malformed_card_fails_only_its_page() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/malformed",
        r#"<a class="DyListCover-wrap" href="/5"><h3 class="DyListCover-intro">no title attr</h3></a>"#
            .to_string(),
    )
    .await;
    mount_page(&mock_server, "/good", directory_page(&[("/6", "good")])).await;

    let config = create_test_config(
        &mock_server.uri(),
        &[("/malformed", "动作"), ("/good", "科幻")],
        &output,
    );

    let report = run_harvest(config).await.unwrap();
    let content = std::fs::read_to_string(&report.written.path).unwrap();

    assert_eq!(report.stats.parse_failures, 1);
    assert_eq!(sorted_data_lines(&content), vec![format!("good,{}6", RELAY)]);
}

#[tokio::test]
async fn test_layout_change_yields_empty_playlist() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/redesigned",
        "<html><body><div class='NewCard'>new layout</div></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &[("/redesigned", "剧情")], &output);
    let report = run_harvest(config).await.unwrap();
    let content = std::fs::read_to_string(&report.written.path).unwrap();

    assert_eq!(report.stats.jobs_harvested, 1);
    assert_eq!(report.stats.entries, 0);
    assert_eq!(content, format!("{}\n", PLAYLIST_HEADER));
}

#[tokio::test]
async fn test_unreachable_host_writes_header_only() {
    let output = TempDir::new().unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base_url = format!("http://127.0.0.1:{}", port);

    let config = create_test_config(&base_url, &[("/a", "古装"), ("/b", "综合")], &output);
    let report = run_harvest(config).await.unwrap();
    let content = std::fs::read_to_string(&report.written.path).unwrap();

    assert_eq!(report.stats.network_failures, 2);
    assert_eq!(content, format!("{}\n", PLAYLIST_HEADER));
}

#[tokio::test]
async fn test_slow_page_is_waited_for() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(directory_page(&[("/77", "slow stream")]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/fast", directory_page(&[("/88", "fast stream")])).await;

    let config = create_test_config(&mock_server.uri(), &[("/slow", "X"), ("/fast", "Y")], &output);
    let report = Harvester::new(config).unwrap().run().await.unwrap();
    let content = std::fs::read_to_string(&report.written.path).unwrap();

    assert_eq!(report.written.entry_lines, 2);
    assert!(content.contains(&format!("slow stream,{}77", RELAY)));
    assert!(content.contains(&format!("fast stream,{}88", RELAY)));
}

#[tokio::test]
async fn test_unwritable_output_is_an_error() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_page(&mock_server, "/ok", directory_page(&[("/1", "s1")])).await;

    let mut config = create_test_config(&mock_server.uri(), &[("/ok", "X")], &output);
    config.output.path = output
        .path()
        .join("missing/dir/douyu.txt")
        .to_string_lossy()
        .into_owned();

    let result = run_harvest(config).await;
    assert!(matches!(result, Err(HarvestError::Output(_))));
}
