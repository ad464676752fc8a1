/// Forum search walkthrough
///
/// - Lazy index build on first search
/// - Indexing a new post and deleting an old one
/// - Trending feed
use forumdex::core::config::Config;
use forumdex::core::engine::SearchEngine;
use forumdex::core::types::{DocId, Document};
use forumdex::storage::memory::MemoryStore;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Creating store and engine...");
    let store = Arc::new(MemoryStore::with_documents([
        create_post(1, "Best pizza place", &["food", "review"], (5, 3)),
        create_post(2, "Best hiking trails", &["outdoors"], (1, 10)),
        create_post(3, "Rust borrow checker question", &["rust", "help"], (0, 0)),
    ]));
    let engine = SearchEngine::new(store.clone(), Config::default());

    println!("\nSearching...");
    for query in ["best", "best pizza", "best mountain", ""] {
        let hits = engine.search_documents(query)?;
        let titles: Vec<&str> = hits.iter().map(|d| d.title.as_str()).collect();
        println!("  {:<16} -> {:?}", format!("'{}'", query), titles);
    }

    println!("\nAsking a new question...");
    let post = create_post(4, "Best rust book?", &["rust"], (2, 1));
    store.insert(post.clone());
    engine.index_one(&post)?;
    println!("  'best rust' -> {} results", engine.search("best rust")?.len());

    println!("\nDeleting post 1...");
    store.remove(&post_id(1));
    engine.remove_one(&post_id(1));
    println!("  'pizza' -> {} results", engine.search("pizza")?.len());

    println!("\nTrending:");
    for (rank, post) in engine.trending()?.iter().enumerate() {
        println!("  {}. {} (up {}, replies {})", rank + 1, post.title, post.upvote_count, post.reply_count);
    }

    let stats = engine.stats();
    println!(
        "\nIndex: {} documents, {} terms, generation {}",
        stats.documents, stats.terms, stats.generation
    );

    Ok(())
}

fn post_id(n: u128) -> DocId {
    DocId::from_u128(n)
}

fn create_post(id: u128, title: &str, tags: &[&str], (upvotes, replies): (u32, u32)) -> Document {
    Document::new(post_id(id), title)
        .with_tags(tags.iter().copied())
        .with_engagement(upvotes, 0, replies)
}
