use super::*;

fn test_client(base_url: &str) -> SerpApiClient {
    SerpApiClient::with_base_url("secret-key", base_url, 5, "pricecmp-test/0.1", 0, 0)
        .expect("failed to build test client")
}

#[test]
fn search_url_carries_engine_query_and_region() {
    let client = test_client("https://serpapi.com");
    let url = client.search_url("iPhone 17 Pro Max", "us", 100).unwrap();
    assert_eq!(url.path(), "/search.json");
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("engine".to_owned(), "google_shopping".to_owned())));
    assert!(pairs.contains(&("q".to_owned(), "iPhone 17 Pro Max".to_owned())));
    assert!(pairs.contains(&("gl".to_owned(), "us".to_owned())));
    assert!(pairs.contains(&("num".to_owned(), "100".to_owned())));
    assert!(pairs.contains(&("api_key".to_owned(), "secret-key".to_owned())));
}

#[test]
fn search_url_keeps_base_path_prefix() {
    let client = test_client("http://127.0.0.1:9999/proxy/");
    let url = client.search_url("desk", "us", 10).unwrap();
    assert_eq!(url.path(), "/proxy/search.json");
}

#[test]
fn with_base_url_rejects_garbage() {
    let result = SerpApiClient::with_base_url("k", "not a url", 5, "ua", 0, 0);
    assert!(
        matches!(result, Err(SearchError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}
