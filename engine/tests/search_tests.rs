use engine::{build, query, search, Document, Index, IndexCache, ScoredResult, TokenizerConfig};
use std::time::{Duration, Instant};

fn sample_documents() -> Vec<Document> {
    vec![
        Document::new("doc1", "JavaScript is a versatile programming language used for web development"),
        Document::new("doc2", "Python is excellent for data science and machine learning applications"),
        Document::new("doc3", "TypeScript adds static typing to JavaScript for better development experience"),
        Document::new("doc4", "React is a popular JavaScript library for building user interfaces"),
        Document::new("doc5", "Machine learning algorithms can process large datasets efficiently"),
    ]
}

fn sorted_ids(results: &[ScoredResult]) -> Vec<&str> {
    let mut ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    ids
}

fn score_of(results: &[ScoredResult], id: &str) -> f64 {
    results.iter().find(|r| r.id == id).map(|r| r.score).unwrap()
}

#[test]
fn no_match_returns_empty() {
    let index = build(&sample_documents()).unwrap();
    assert!(query(&index, "nonexistent").is_empty());
}

#[test]
fn exact_keyword_matches() {
    let index = build(&sample_documents()).unwrap();
    let results = query(&index, "JavaScript");
    assert_eq!(sorted_ids(&results), vec!["doc1", "doc3", "doc4"]);
    assert!(results.iter().all(|r| r.score > 0.0));
}

#[test]
fn case_insensitive() {
    let index = build(&sample_documents()).unwrap();
    assert_eq!(query(&index, "javascript"), query(&index, "JavaScript"));
    assert_eq!(query(&index, "JAVASCRIPT"), query(&index, "JavaScript"));
}

#[test]
fn partial_word_matches() {
    let index = build(&sample_documents()).unwrap();
    let results = query(&index, "learn");
    assert_eq!(sorted_ids(&results), vec!["doc2", "doc5"]);
}

#[test]
fn results_sorted_by_score() {
    let index = build(&sample_documents()).unwrap();
    let results = query(&index, "machine");
    assert_eq!(results.len(), 2);
    // doc5 opens with "Machine"
    assert_eq!(results[0].id, "doc5");
    assert!(results[0].score > results[1].score);
}

#[test]
fn frequent_matches_score_higher() {
    let docs = vec![
        Document::new("a", "python programming"),
        Document::new("b", "python python programming python"),
    ];
    let results = search(&docs, "python").unwrap();
    assert_eq!(results.len(), 2);
    assert!(score_of(&results, "b") > score_of(&results, "a"));
}

#[test]
fn leading_matches_score_higher() {
    let docs = vec![
        Document::new("a", "programming with python is fun"),
        Document::new("b", "python programming tutorial"),
    ];
    let results = search(&docs, "python").unwrap();
    assert_eq!(results.len(), 2);
    assert!(score_of(&results, "b") > score_of(&results, "a"));
}

#[test]
fn multiple_keywords_favor_broader_coverage() {
    let docs = vec![
        Document::new("single", "JavaScript programming tutorial"),
        Document::new("multiple", "JavaScript development and web development"),
    ];
    let results = search(&docs, "JavaScript development").unwrap();
    assert_eq!(results.len(), 2);
    assert!(score_of(&results, "multiple") > score_of(&results, "single"));

    let results = search(&sample_documents(), "JavaScript development").unwrap();
    assert_eq!(sorted_ids(&results), vec!["doc1", "doc3", "doc4"]);
}

#[test]
fn empty_content_is_never_matched() {
    let docs = vec![Document::new("empty", ""), Document::new("normal", "python programming")];
    let results = search(&docs, "python").unwrap();
    assert_eq!(sorted_ids(&results), vec!["normal"]);
}

#[test]
fn empty_corpus_and_empty_query() {
    assert!(search(&[], "test").unwrap().is_empty());
    assert!(search(&sample_documents(), "").unwrap().is_empty());
    assert!(search(&sample_documents(), " ,;. ").unwrap().is_empty());
}

#[test]
fn special_characters_in_documents() {
    let docs = vec![Document::new("special", "API endpoints use HTTP methods like GET, POST, PUT")];
    assert_eq!(search(&docs, "API").unwrap().len(), 1);
    assert_eq!(search(&docs, "get,").unwrap().len(), 1);
}

#[test]
fn very_long_documents() {
    let content = "word ".repeat(10_000) + "target keyword here";
    let docs = vec![Document::new("long", content)];
    let results = search(&docs, "target").unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].score > 1.0);
}

#[test]
fn index_applies_its_tokenizer_config_to_queries() {
    let nfkc = TokenizerConfig { nfkc: true };
    let index = Index::build_with(&[Document::new("a", "ﬁle")], nfkc).unwrap();
    assert!(index.tokenizer_config().nfkc);
    assert_eq!(sorted_ids(&index.query("file")), vec!["a"]);
    assert_eq!(sorted_ids(&index.query("ﬁle")), vec!["a"]);

    let plain = Index::build(&[Document::new("a", "ﬁle")]).unwrap();
    assert!(!plain.tokenizer_config().nfkc);
    assert!(plain.query("file").is_empty());
}

#[test]
fn decomposed_accents_match_composed_queries_under_nfkc() {
    let docs = vec![Document::new("nfd", "cafe\u{301} menu"), Document::new("plain", "cafe")];
    let index = Index::build_with(&docs, TokenizerConfig { nfkc: true }).unwrap();
    assert_eq!(sorted_ids(&index.query("café")), vec!["nfd"]);
}

#[test]
fn scripts_with_combining_vowels_match_whole_words() {
    let docs = vec![Document::new("x", "हिन्दी"), Document::new("y", "हम")];
    let results = search(&docs, "हिन्दी").unwrap();
    assert_eq!(sorted_ids(&results), vec!["x"]);
}

#[test]
fn empty_id_fails_fast() {
    let docs = vec![Document::new("", "python")];
    assert!(search(&docs, "python").is_err());
}

fn large_dataset() -> Vec<Document> {
    (0..10_000)
        .map(|i| {
            Document::new(
                format!("doc{i}"),
                format!(
                    "Document {i} contains various keywords like programming, development, testing, and implementation. Some documents also mention specific technologies."
                ),
            )
        })
        .collect()
}

fn latency_budget(release: Duration) -> Duration {
    // Unoptimized builds are an order of magnitude slower.
    if cfg!(debug_assertions) { release * 10 } else { release }
}

#[test]
fn large_dataset_is_fast() {
    let docs = large_dataset();
    let start = Instant::now();
    let results = search(&docs, "programming").unwrap();
    assert_eq!(results.len(), 10_000);
    assert!(start.elapsed() < latency_budget(Duration::from_secs(1)));
}

#[test]
fn repeated_searches_reuse_one_index() {
    let docs = large_dataset();
    let cache = IndexCache::new();
    let start = Instant::now();
    for q in ["programming", "development", "testing", "implementation"] {
        let index = cache.get_or_build(&docs).unwrap();
        assert_eq!(index.query(q).len(), 10_000);
    }
    assert!(start.elapsed() < latency_budget(Duration::from_secs(2)));
    assert_eq!(cache.len(), 1);
}

#[test]
fn index_shared_across_threads() {
    let index = std::sync::Arc::new(Index::build(&sample_documents()).unwrap());
    let expected = index.query("development");
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = std::sync::Arc::clone(&index);
            std::thread::spawn(move || index.query("development"))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
