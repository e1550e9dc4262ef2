use crate::common::{create_test_context, page_json, AUTHORIZATION};
use gistwatcher::fetch::{fetch_listing, ConcurrentFetcher, RequestDescriptor};
use gistwatcher::GistError;
use std::time::Duration;
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Echoes the trailing path number, failing every third one, with delays
/// arranged so that later requests tend to finish first
struct EchoIndex;

impl Respond for EchoIndex {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let index: u64 = request
            .url
            .path()
            .rsplit('/')
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        let template = if index % 3 == 0 {
            ResponseTemplate::new(500).set_body_string(format!("fail {}", index))
        } else {
            ResponseTemplate::new(200).set_body_string(index.to_string())
        };

        template.set_delay(Duration::from_millis((7 - index % 7) * 3))
    }
}

#[tokio::test]
async fn test_fetcher_correlates_mixed_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/item/\d+$"))
        .respond_with(EchoIndex)
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let unreachable_index = 50;

    let descriptors: Vec<RequestDescriptor> = (0..120)
        .map(|i| {
            let url = if i == unreachable_index {
                // Port 1 is reserved and refuses connections
                "http://127.0.0.1:1/item/50".to_string()
            } else {
                format!("{}/item/{}", mock_server.uri(), i)
            };
            RequestDescriptor::get(&client, &url, None).expect("Failed to build request")
        })
        .collect();

    let envelopes = ConcurrentFetcher::new(10).execute(descriptors).await;
    assert_eq!(envelopes.len(), 120);

    for (i, envelope) in envelopes.iter().enumerate() {
        assert!(envelope.url.ends_with(&format!("/item/{}", i)));

        if i == unreachable_index {
            assert!(envelope.outcome.is_err(), "request {} should fail", i);
            continue;
        }

        let response = envelope.outcome.as_ref().expect("transport failure");
        if i % 3 == 0 {
            assert_eq!(response.status.as_u16(), 500);
            assert_eq!(response.text(), format!("fail {}", i));
        } else {
            assert!(response.is_success());
            assert_eq!(response.text(), i.to_string());
        }
    }
}

#[tokio::test]
async fn test_fetcher_single_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(ResponseTemplate::new(200).set_body_string("only"))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let descriptor =
        RequestDescriptor::get(&client, &format!("{}/one", mock_server.uri()), None).unwrap();

    let envelopes = ConcurrentFetcher::default().execute(vec![descriptor]).await;
    assert_eq!(envelopes.len(), 1);
    assert_eq!(envelopes[0].outcome.as_ref().unwrap().text(), "only");
}

#[tokio::test]
async fn test_listing_three_pages_oldest_first() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let link = format!(
        r#"<{base}/gists?page=2&per_page=100>; rel="next", <{base}/gists?page=3&per_page=100>; rel="last""#
    );

    Mock::given(method("GET"))
        .and(path("/gists"))
        .and(query_param("page", "1"))
        .and(header("authorization", AUTHORIZATION))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(237, 138))
                .insert_header("link", link.as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gists"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "100"))
        .and(header("authorization", AUTHORIZATION))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(137, 38))
                .set_delay(Duration::from_millis(30)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gists"))
        .and(query_param("page", "3"))
        .and(header("authorization", AUTHORIZATION))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(37, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = create_test_context(&mock_server);
    let items = fetch_listing(&ctx, &format!("{}/gists", base))
        .await
        .expect("Listing failed");

    assert_eq!(items.len(), 237);
    assert_eq!(items[0].id, "gist-1");
    assert_eq!(items[236].id, "gist-237");
    assert!(items.iter().all(|i| !i.is_error()));

    let created: Vec<_> = items.iter().map(|i| i.created_at.unwrap()).collect();
    assert!(created.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_listing_without_link_header_is_single_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gists"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(3, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = create_test_context(&mock_server);
    let items = fetch_listing(&ctx, &format!("{}/gists", mock_server.uri()))
        .await
        .unwrap();

    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["gist-1", "gist-2", "gist-3"]);
}

#[tokio::test]
async fn test_listing_failed_page_becomes_error_item() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/gists"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(4, 3))
                .insert_header(
                    "link",
                    format!(r#"<{base}/gists?page=2&per_page=100>; rel="last""#).as_str(),
                ),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gists"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let ctx = create_test_context(&mock_server);
    let items = fetch_listing(&ctx, &format!("{}/gists", base))
        .await
        .expect("A failed page must not abort the listing");

    // Reversal puts the failed (last) page first
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].error.as_deref(), Some("upstream exploded"));
    assert_eq!(items[1].id, "gist-3");
    assert_eq!(items[2].id, "gist-4");
}

#[tokio::test]
async fn test_listing_first_page_failure_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gists"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"message":"Bad credentials"}"#),
        )
        .mount(&mock_server)
        .await;

    let ctx = create_test_context(&mock_server);
    let result = fetch_listing(&ctx, &format!("{}/gists", mock_server.uri())).await;

    match result {
        Err(GistError::FirstPage { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Bad credentials"));
        }
        other => panic!("expected FirstPage error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_listing_first_page_decode_failure_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gists"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let ctx = create_test_context(&mock_server);
    let result = fetch_listing(&ctx, &format!("{}/gists", mock_server.uri())).await;
    assert!(matches!(result, Err(GistError::Decode { .. })));
}

#[tokio::test]
async fn test_listing_malformed_link_header_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gists"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(2, 1))
                .insert_header("link", "page=2; rel=next"),
        )
        .mount(&mock_server)
        .await;

    let ctx = create_test_context(&mock_server);
    let result = fetch_listing(&ctx, &format!("{}/gists", mock_server.uri())).await;
    assert!(matches!(result, Err(GistError::Pagination(_))));
}
