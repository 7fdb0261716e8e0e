//! Browse the built-in word list.
//!
//! Type to filter, scroll with the arrow keys, page keys or the mouse wheel,
//! Ctrl+R to reload and Esc to quit. Logs go to `wordscroll.log` in the
//! system temp directory.

use wordscroll::{DictionaryApp, DictionaryFlags, ProgramOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ProgramOptions {
        title: Some("wordscroll".to_string()),
        log_file: Some(std::env::temp_dir().join("wordscroll.log")),
        ..ProgramOptions::default()
    };
    let app = wordscroll::run_with::<DictionaryApp>(DictionaryFlags::default(), options).await?;
    println!(
        "{} of {} words matched {:?}",
        app.list().filtered_len(),
        app.list().item_count(),
        app.list().query()
    );
    Ok(())
}
