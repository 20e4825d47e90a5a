use std::time::Duration;

use serde_json::json;
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roster_feed::{Feed, FeedClientConfig, FeedError, FeedSource, HttpFeedClient};

fn client_for(server: &MockServer) -> HttpFeedClient {
    let authors_url = Url::parse(&format!("{}/authors", server.uri())).unwrap();
    let roles_url = Url::parse(&format!("{}/roles", server.uri())).unwrap();
    HttpFeedClient::new(
        FeedClientConfig::new(authors_url, roles_url)
            .with_request_timeout(Duration::from_secs(2)),
    )
}

#[tokio::test]
async fn fetches_author_records() {
    let server = MockServer::start().await;
    let uuid = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/authors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "A1",
                "name": "Jane Doe",
                "email": "jane.doe@example.com",
                "twitterHandle": "@janedoe",
                "biography": "<p>Hi</p>",
                "imageUrl": "https://images.example.com/jane.png",
                "uuid": uuid,
            },
            {
                "id": "A2",
                "name": "John Roe",
                "uuid": Uuid::new_v4(),
            }
        ])))
        .mount(&server)
        .await;

    let authors = client_for(&server).fetch_authors().await.unwrap();

    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0].id, "A1");
    assert_eq!(authors[0].name, "Jane Doe");
    assert_eq!(authors[0].twitter_handle, "@janedoe");
    assert_eq!(authors[0].uuid, uuid);
    // Absent columns default to empty rather than failing the row.
    assert_eq!(authors[1].email, "");
    assert_eq!(authors[1].biography, "");
}

#[tokio::test]
async fn fetches_role_records() {
    let server = MockServer::start().await;
    let membership_uuid = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "A1", "title": "Columnist", "membershipUuid": membership_uuid}
        ])))
        .mount(&server)
        .await;

    let roles = client_for(&server).fetch_roles().await.unwrap();

    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, "A1");
    assert_eq!(roles[0].title, "Columnist");
    assert_eq!(roles[0].membership_uuid, membership_uuid);
}

#[tokio::test]
async fn non_success_status_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authors"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_authors().await.unwrap_err();

    assert!(matches!(
        err,
        FeedError::Status {
            feed: Feed::Authors,
            status: 502
        }
    ));
}

#[tokio::test]
async fn malformed_payload_is_a_malformed_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_roles().await.unwrap_err();

    assert!(matches!(err, FeedError::Malformed { feed: Feed::Roles, .. }));
}

#[tokio::test]
async fn unreachable_authority_is_unavailable() {
    // Nothing listens on the mock server once it is dropped.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let authors_url = Url::parse(&format!("{uri}/authors")).unwrap();
    let roles_url = Url::parse(&format!("{uri}/roles")).unwrap();
    let client = HttpFeedClient::new(
        FeedClientConfig::new(authors_url, roles_url)
            .with_request_timeout(Duration::from_secs(2)),
    );

    let err = client.fetch_authors().await.unwrap_err();

    assert!(matches!(err, FeedError::Unavailable { feed: Feed::Authors, .. }));
}

#[tokio::test]
async fn slow_authority_times_out_as_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authors"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let authors_url = Url::parse(&format!("{}/authors", server.uri())).unwrap();
    let roles_url = Url::parse(&format!("{}/roles", server.uri())).unwrap();
    let client = HttpFeedClient::new(
        FeedClientConfig::new(authors_url, roles_url)
            .with_request_timeout(Duration::from_millis(100)),
    );

    let err = client.fetch_authors().await.unwrap_err();

    assert!(matches!(err, FeedError::Unavailable { feed: Feed::Authors, .. }));
}

#[tokio::test]
async fn connectivity_check_passes_on_parseable_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    // The probe only needs parseable JSON, not the typed record schema.
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.check_authors_connectivity().await.is_ok());
    assert!(client.check_roles_connectivity().await.is_ok());
}

#[tokio::test]
async fn connectivity_check_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .check_roles_connectivity()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FeedError::Status {
            feed: Feed::Roles,
            status: 503
        }
    ));
}
