use board::{BannerClient, BannerError};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_contains};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer) -> BannerClient {
    BannerClient::new(
        format!("{}/sheet/pub?output=csv", server.uri()),
        Duration::from_secs(5)
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetch_returns_first_cell() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet/pub"))
        .and(query_param("output", "csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("\"Quarter close: reports frozen\",,\nother,row\n")
        )
        .mount(&server)
        .await;

    let message = client(&server).fetch().await.unwrap();
    assert_eq!(message.as_deref(), Some("Quarter close: reports frozen"));
}

#[tokio::test]
async fn test_fetch_sends_cache_buster() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet/pub"))
        .and(query_param_contains("_", ""))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).fetch().await.unwrap();

    let requests: Vec<Request> = server.received_requests().await.unwrap();
    let buster = requests[0]
        .url
        .query_pairs()
        .find(|(key, _)| key == "_")
        .map(|(_, value)| value.into_owned())
        .unwrap();
    assert!(buster.parse::<i64>().unwrap() > 0);
}

#[tokio::test]
async fn test_empty_cell_means_no_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(",second\n"))
        .mount(&server)
        .await;

    assert_eq!(client(&server).fetch().await.unwrap(), None);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).fetch().await.unwrap_err();
    assert!(matches!(err, BannerError::Status { status: 404 }));
}
