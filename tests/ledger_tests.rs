use std::sync::Arc;

use marquee_api::models::{NewSearchRecord, TopResult};
use marquee_api::services::PopularityLedger;
use marquee_api::store::{DocumentStore, MemoryDocumentStore};

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

fn setup() -> (Arc<MemoryDocumentStore>, PopularityLedger) {
    let store = Arc::new(MemoryDocumentStore::new());
    let ledger = PopularityLedger::new(store.clone(), None, POSTER_BASE.to_string());
    (store, ledger)
}

fn top_result(id: u64, poster_path: &str) -> TopResult {
    TopResult {
        id,
        poster_path: poster_path.to_string(),
    }
}

/// Seeds a record with an arbitrary count, bypassing the ledger
async fn seed(store: &MemoryDocumentStore, term: &str, count: u64) {
    store
        .create_record(NewSearchRecord {
            search_term: term.to_string(),
            count,
            movie_id: 900,
            poster_url: format!("{}/{}.jpg", POSTER_BASE, term),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_repeated_occurrences_keep_one_record_with_matching_count() {
    let (store, ledger) = setup();

    for _ in 0..4 {
        ledger
            .try_record_occurrence("batman", &top_result(101, "/a.jpg"))
            .await
            .unwrap();
    }

    let record = store.find_by_term("batman").await.unwrap().unwrap();
    assert_eq!(record.count, 4);

    // Still exactly one record in the store
    let all = store.query_top_by_count(100).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_representative_result_is_first_write_wins() {
    let (store, ledger) = setup();

    ledger
        .try_record_occurrence("x", &top_result(101, "/a.jpg"))
        .await
        .unwrap();
    ledger
        .try_record_occurrence("x", &top_result(202, "/b.jpg"))
        .await
        .unwrap();

    let record = store.find_by_term("x").await.unwrap().unwrap();
    assert_eq!(record.count, 2);
    assert_eq!(record.movie_id, 101);
    assert_eq!(record.poster_url, format!("{}/a.jpg", POSTER_BASE));
}

#[tokio::test]
async fn test_count_grows_by_one_per_occurrence() {
    let (store, ledger) = setup();

    for expected in 1..=5u64 {
        ledger
            .try_record_occurrence("dune", &top_result(438631, "/d.jpg"))
            .await
            .unwrap();
        let record = store.find_by_term("dune").await.unwrap().unwrap();
        assert_eq!(record.count, expected);
    }
}

#[tokio::test]
async fn test_trending_returns_top_counts_in_order() {
    let (store, ledger) = setup();
    seed(&store, "alien", 10).await;
    seed(&store, "dune", 7).await;
    seed(&store, "casino", 7).await;
    seed(&store, "batman", 3).await;

    let trending = ledger.get_trending(3).await;
    let counts: Vec<u64> = trending.iter().map(|r| r.count).collect();
    assert_eq!(counts, vec![10, 7, 7]);

    // Equal counts order by term
    assert_eq!(trending[0].search_term, "alien");
    assert_eq!(trending[1].search_term, "casino");
    assert_eq!(trending[2].search_term, "dune");
}

#[tokio::test]
async fn test_trending_on_empty_store_is_empty() {
    let (_store, ledger) = setup();
    let trending = ledger.get_trending(5).await;
    assert!(trending.is_empty());
}

#[tokio::test]
async fn test_trending_limit_larger_than_store() {
    let (store, ledger) = setup();
    seed(&store, "alien", 2).await;

    let trending = ledger.get_trending(5).await;
    assert_eq!(trending.len(), 1);
}

#[tokio::test]
async fn test_trending_zero_limit_is_empty() {
    let (store, ledger) = setup();
    seed(&store, "alien", 2).await;

    let trending = ledger.get_trending(0).await;
    assert!(trending.is_empty());
}

#[tokio::test]
async fn test_distinct_terms_get_distinct_records() {
    let (store, ledger) = setup();

    ledger
        .try_record_occurrence("batman", &top_result(101, "/a.jpg"))
        .await
        .unwrap();
    ledger
        .try_record_occurrence("Batman", &top_result(101, "/a.jpg"))
        .await
        .unwrap();

    // Terms are case-sensitive natural keys
    let all = store.query_top_by_count(100).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_batman_scenario() {
    let (store, ledger) = setup();

    ledger
        .try_record_occurrence("batman", &top_result(101, "/a.jpg"))
        .await
        .unwrap();

    let record = store.find_by_term("batman").await.unwrap().unwrap();
    assert_eq!(record.count, 1);
    assert_eq!(record.movie_id, 101);
    assert_eq!(record.poster_url, format!("{}/a.jpg", POSTER_BASE));

    ledger
        .try_record_occurrence("batman", &top_result(202, "/b.jpg"))
        .await
        .unwrap();

    let record = store.find_by_term("batman").await.unwrap().unwrap();
    assert_eq!(record.count, 2);
    assert_eq!(record.movie_id, 101);
    assert_eq!(record.poster_url, format!("{}/a.jpg", POSTER_BASE));
}
