//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → HTTP fetcher → decoded
//! pages → expansion lookup → in-place pagination

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tweetpage::{
    ClientConfig, CursorState, Direction, Entity, Error, Fetcher, HttpFetcher, ResponsePayload,
    ResultCollection,
};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_page(ids: &[&str], meta: serde_json::Value) -> serde_json::Value {
    let data: Vec<_> = ids
        .iter()
        .map(|id| json!({"id": id, "text": format!("tweet {id}"), "author_id": "2244994945"}))
        .collect();
    json!({
        "data": data,
        "includes": {"users": [{"id": "2244994945", "name": "Twitter Dev", "username": "TwitterDev"}]},
        "meta": meta
    })
}

fn config_for(server: &MockServer) -> ClientConfig {
    let yaml = format!(
        r"
url: {}/2/tweets/search/recent
query:
  query: from:TwitterDev
  expansions: author_id
bearer_token: test-token
http:
  max_retries: 1
  backoff:
    type: constant
    initial_ms: 10
",
        server.uri()
    );
    ClientConfig::from_yaml_str(&yaml).unwrap()
}

async fn mount_search_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param_is_missing("next_token"))
        .and(query_param_is_missing("previous"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            &["1", "2"],
            json!({"result_count": 2, "newest_id": "2", "oldest_id": "1", "next_token": "t1"}),
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param("next_token", "t1"))
        .and(query_param("query", "from:TwitterDev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            &["3", "4"],
            json!({"result_count": 2, "next_token": "t2", "previous_token": "p1"}),
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param("next_token", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            &["5"],
            json!({"result_count": 1, "previous_token": "p2"}),
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param("previous", "p2"))
        .and(query_param_is_missing("next_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            &["3", "4"],
            json!({"result_count": 2, "next_token": "t2", "previous_token": "p1"}),
        )))
        .mount(server)
        .await;
}

fn first_page(config: &ClientConfig) -> tweetpage::Result<ResultCollection> {
    let fetcher = Arc::new(config.build_fetcher()?);
    let context = config.request_context(fetcher.clone())?;
    let response = fetcher.get(&context.url, &context.query)?.error_for_status()?;
    ResponsePayload::parse(response.bytes(), Some(context))
}

fn ids(collection: &ResultCollection) -> Vec<String> {
    collection.iter().filter_map(|t| t.id.clone()).collect()
}

// ============================================================================
// Pagination Over HTTP
// ============================================================================

#[tokio::test]
async fn test_walk_pages_over_http() {
    let server = MockServer::start().await;
    mount_search_pages(&server).await;
    let config = config_for(&server);

    let walked = tokio::task::spawn_blocking(move || -> tweetpage::Result<Vec<Vec<String>>> {
        let mut collection = first_page(&config)?;
        let mut pages = vec![ids(&collection)];
        while collection.has_next_page() {
            collection.next_page()?;
            pages.push(ids(&collection));
        }

        let author = collection
            .expansions()
            .and_then(|e| e.author_of(&collection[0]))
            .and_then(|u| u.username.clone());
        assert_eq!(author.as_deref(), Some("TwitterDev"));

        collection.next_page()?;
        assert_eq!(collection.state(), CursorState::Exhausted(Direction::Next));

        collection.prev_page()?;
        pages.push(ids(&collection));
        Ok(pages)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(
        walked,
        vec![
            vec!["1".to_string(), "2".to_string()],
            vec!["3".to_string(), "4".to_string()],
            vec!["5".to_string()],
            vec!["3".to_string(), "4".to_string()],
        ]
    );
}

#[tokio::test]
async fn test_http_error_during_paging_keeps_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param_is_missing("next_token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_page(&["1"], json!({"next_token": "expired"}))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param("next_token", "expired"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "title": "Invalid Request",
            "detail": "One or more parameters to your request was invalid."
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    tokio::task::spawn_blocking(move || {
        let mut collection = first_page(&config).unwrap();

        let err = collection.next_page().unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 400, .. }));
        assert_eq!(collection.state(), CursorState::Failed);
        assert_eq!(ids(&collection), vec!["1".to_string()]);
        assert!(collection.has_next_page());
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_fetcher_retries_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2/tweets"))
        .and(query_param("ids", "20"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [{"id": "20", "text": "just setting up my twttr"}]})),
        )
        .mount(&server)
        .await;

    let url = format!("{}/2/tweets", server.uri());
    let collection = tokio::task::spawn_blocking(move || -> tweetpage::Result<ResultCollection> {
        let config = ClientConfig::from_yaml_str(&format!(
            "url: {url}\nquery:\n  ids: '20'\nhttp:\n  backoff:\n    type: constant\n    initial_ms: 5\n"
        ))?;
        let fetcher = Arc::new(HttpFetcher::with_config(config.fetcher_config())?);
        let context = config.request_context(fetcher.clone())?;
        let body = fetcher.send(&context.url, &context.query)?;
        ResponsePayload::parse(body.bytes(), Some(context))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(collection[0].text.as_deref(), Some("just setting up my twttr"));
}

// ============================================================================
// Offline Decoding
// ============================================================================

#[test]
fn test_full_lookup_response() {
    let body = json!({
        "data": [{
            "id": "1212092628029698048",
            "text": "We believe the best future version of our API will come from building it with YOU.",
            "author_id": "2244994945",
            "created_at": "2019-12-31T19:26:16.000Z",
            "possibly_sensitive": false,
            "reply_settings": "everyone",
            "source": "Twitter Web App",
            "lang": "en",
            "attachments": {"media_keys": ["16_1211797899316740096"], "poll_ids": ["1199786642468413448"]},
            "geo": {"place_id": "01a9a39529b27f36"},
            "referenced_tweets": [{"type": "replied_to", "id": "1212092627178287104"}],
            "public_metrics": {"retweet_count": 7, "reply_count": 3, "like_count": 38, "quote_count": 4},
            "entities": {
                "hashtags": [{"start": 0, "end": 6, "tag": "TwitterDev"}],
                "mentions": [{"start": 7, "end": 15, "username": "suhemparack", "id": "857699969263964161"}],
                "urls": [{"start": 16, "end": 39, "url": "https://t.co/yvxdK6aOo2", "expanded_url": "https://twittercommunity.com/"}]
            },
            "context_annotations": [{
                "domain": {"id": "47", "name": "Brand", "description": "Brands and Companies"},
                "entity": {"id": "10045225402", "name": "Twitter"}
            }],
            "edit_controls": {"edits_remaining": 5, "is_edit_eligible": true}
        }],
        "includes": {
            "users": [{"id": "2244994945", "name": "Twitter Dev", "username": "TwitterDev", "verified": true}],
            "media": [{"media_key": "16_1211797899316740096", "type": "animated_gif", "width": 400}],
            "polls": [{"id": "1199786642468413448", "voting_status": "closed", "options": [
                {"position": 1, "label": "C Sharp", "votes": 795},
                {"position": 2, "label": "C Hashtag", "votes": 156}
            ]}],
            "places": [{"id": "01a9a39529b27f36", "full_name": "Manhattan, NY", "country_code": "US"}],
            "tweets": [{"id": "1212092627178287104", "text": "hello"}]
        }
    });

    let collection = ResponsePayload::parse(body.to_string(), None).unwrap();
    let tweet = &collection[0];
    let expansions = collection.expansions().unwrap();

    assert_eq!(tweet.is_sensitive(), Some(false));
    assert_eq!(tweet.permission(), Some("everyone"));
    assert_eq!(tweet.device(), Some("Twitter Web App"));
    assert!(tweet.created_time().is_some());
    assert_eq!(tweet.raw("edit_controls").unwrap()["edits_remaining"], 5);
    assert_eq!(tweet.annotations.hashtags()[0].text(), Some("TwitterDev"));
    assert_eq!(tweet.annotations.mentions()[0].text(), Some("suhemparack"));
    assert_eq!(
        tweet.annotations.urls()[0].text(),
        Some("https://twittercommunity.com/")
    );
    assert_eq!(
        tweet.annotations.context_pairs(),
        vec![(Some("Brand"), Some("Twitter"))]
    );

    assert_eq!(
        expansions.author_of(tweet).and_then(|u| u.username.as_deref()),
        Some("TwitterDev")
    );
    let media = expansions.media_of(tweet);
    assert_eq!(media[0].1.and_then(|m| m.media_type.as_deref()), Some("animated_gif"));
    let polls = expansions.polls_of(tweet);
    assert_eq!(polls[0].1.map(|p| p.total_votes()), Some(951));
    assert_eq!(
        expansions.place_of(tweet).and_then(|p| p.full_name.as_deref()),
        Some("Manhattan, NY")
    );
    let referenced = expansions.referenced_tweets_of(tweet);
    assert_eq!(referenced[0].0.ref_type.as_deref(), Some("replied_to"));
    assert_eq!(referenced[0].1.and_then(|t| t.text.as_deref()), Some("hello"));
}

#[test]
fn test_single_record_response_without_context() {
    let body = r#"{"data": {"id": "20", "text": "just setting up my twttr"}}"#;
    let mut collection = ResponsePayload::parse(body, None).unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(collection.meta().and_then(|m| m.result_count), None);

    collection.next_page().unwrap().prev_page().unwrap();
    assert_eq!(collection.state(), CursorState::Exhausted(Direction::Previous));
    assert_eq!(collection.len(), 1);
}
