use std::time::Duration;

use tcg_browser::Language;
use tcg_browser::catalog::{CardFinder, CardQuery, CatalogError, LocalId, SetDirectory, TcgdexProvider};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn provider_for(server: &MockServer, language: Language) -> TcgdexProvider {
    TcgdexProvider::new(
        Some(server.uri()),
        language,
        Duration::from_secs(5),
        "tcg-browser-tests/0.1",
    )
    .expect("client builds")
}

const SETS_JSON: &str = r#"[
    {"id": "base1", "name": "Base Set", "logo": "https://assets.tcgdex.net/en/base/base1/logo",
     "symbol": "https://assets.tcgdex.net/univ/base/base1/symbol",
     "cardCount": {"total": 102, "official": 102}},
    {"id": "base2", "name": "Jungle", "cardCount": {"total": 64, "official": 64}},
    {"id": "sv03.5", "name": "151"}
]"#;

const CARDS_JSON: &str = r#"[
    {"id": "base1-58", "localId": "58", "name": "Pikachu",
     "image": "https://assets.tcgdex.net/en/base/base1/58"},
    {"id": "base1-60", "localId": 60, "name": "Pikachu Promo", "rarity": "Promo"},
    {"id": "base1-61", "localId": "61", "name": "Pikachu Variant", "image": null}
]"#;

// ============================================================================
// Set Directory
// ============================================================================

#[tokio::test]
async fn test_list_sets_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/en/sets"))
        .and(header("user-agent", "tcg-browser-tests/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SETS_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Language::En);
    let sets = provider.list_sets().await.unwrap();

    assert_eq!(sets.len(), 3);
    assert_eq!(sets[0].id, "base1");
    assert_eq!(sets[0].name, "Base Set");
    assert_eq!(sets[0].card_count.as_ref().map(|c| c.total), Some(102));
    assert!(sets[1].logo.is_none());
    assert!(sets[2].card_count.is_none());
}

#[tokio::test]
async fn test_list_sets_uses_language_in_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fr/sets"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"id":"base1","name":"Set de Base"}]"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Language::Fr);
    let sets = provider.list_sets().await.unwrap();
    assert_eq!(sets[0].name, "Set de Base");
}

#[tokio::test]
async fn test_list_sets_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/en/sets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Language::En);
    let result = provider.list_sets().await;

    match result {
        Err(CatalogError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("internal error"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_sets_bad_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/en/sets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Language::En);
    assert!(matches!(
        provider.list_sets().await,
        Err(CatalogError::Parse(_))
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let mock_server = MockServer::start().await;
    let provider = provider_for(&mock_server, Language::En);
    drop(mock_server);

    assert!(matches!(
        provider.list_sets().await,
        Err(CatalogError::Network(_))
    ));
}

// ============================================================================
// Card Finder
// ============================================================================

#[tokio::test]
async fn test_find_cards_sends_name_and_set() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/en/cards"))
        .and(query_param("name", "Pikachu"))
        .and(query_param("set", "base1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CARDS_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Language::En);
    let cards = provider
        .find_cards(CardQuery {
            name: "Pikachu",
            set_id: "base1",
        })
        .await
        .unwrap();

    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].local_id, LocalId::from("58"));
    assert_eq!(
        cards[0].high_res_image_url().as_deref(),
        Some("https://assets.tcgdex.net/en/base/base1/58/high.png")
    );
    assert_eq!(cards[1].local_id, LocalId::from(60));
    assert!(cards[1].image.is_none());
    assert!(cards[2].high_res_image_url().is_none());
}

#[tokio::test]
async fn test_find_cards_encodes_query() {
    let mock_server = MockServer::start().await;

    // wiremock matches on the decoded value
    Mock::given(method("GET"))
        .and(path("/en/cards"))
        .and(query_param("name", "Mr. Mime & Co"))
        .and(query_param("set", "sv03.5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Language::En);
    let cards = provider
        .find_cards(CardQuery {
            name: "Mr. Mime & Co",
            set_id: "sv03.5",
        })
        .await
        .unwrap();
    assert!(cards.is_empty());
}

#[tokio::test]
async fn test_find_cards_null_body_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/en/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Language::En);
    let cards = provider
        .find_cards(CardQuery {
            name: "Nothing",
            set_id: "base1",
        })
        .await
        .unwrap();
    assert!(cards.is_empty());
}

#[tokio::test]
async fn test_find_cards_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/en/cards"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"not found"}"#))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Language::En);
    let err = provider
        .find_cards(CardQuery {
            name: "Pikachu",
            set_id: "nope",
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Api { status: 404, .. }));
    assert!(err.to_string().contains("404"));
}
