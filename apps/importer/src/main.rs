//! `pleco-import` - import Pleco flashcard exports into a local note collection.

#[tokio::main]
async fn main() {
    if let Err(e) = pleco_import::run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
