use asset_browser::config::BrowserConfig;
use asset_browser::scan;
use asset_browser::state::library::Library;

fn main() {
    let config = match BrowserConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠️  Could not load config, starting with defaults: {}", e);
            BrowserConfig::default()
        }
    };

    // Initialize the database
    // If this fails, we panic because the app cannot function without its database
    let mut library = Library::new()
        .expect("Failed to initialize database. Check permissions and disk space.");

    let file_count = library.file_count().unwrap_or(0);
    println!("🗂️  Asset Browser initialized with {} files in the catalog", file_count);

    if config.roots.is_empty() {
        eprintln!(
            "⚠️  No root directories configured in {}, nothing to scan",
            BrowserConfig::config_path().display()
        );
        return;
    }

    let candidates = scan::scan(&config.roots);

    match library.upsert_all(&candidates) {
        Ok(inserted) => {
            let skipped = candidates.len() - inserted;
            println!(
                "✅ Index complete! Added {} files, skipped {} duplicates.",
                inserted, skipped
            );
        }
        Err(e) => {
            eprintln!("❌ Indexing failed, catalog left unchanged: {}", e);
        }
    }
}
