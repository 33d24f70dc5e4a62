use quizzer::tags::{self, attr};
use quizzer::{QuizError, SessionBuilder, SystemClock};
use std::env;
use std::sync::Arc;

/// Opens a quiz, normalizes it, and prints its navigation list.
fn main() -> Result<(), QuizError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Prints the navigation list of a quiz document.");
        eprintln!();
        eprintln!("Usage: {} <path/to/quiz.xml> [path/to/config.json]", args[0]);
        eprintln!();
        eprintln!("Missing PageGroup/Rep attributes and blank question sets are written");
        eprintln!("back to the quiz file. Set RUST_LOG=debug for details.");
        std::process::exit(1);
    }

    let quiz_path = &args[1];
    let mut builder = SessionBuilder::new()
        .with_document_file(quiz_path)
        .with_clock(Arc::new(SystemClock::new()));
    if let Some(config_path) = args.get(2) {
        println!("Loading configuration from {}", config_path);
        builder = builder.with_config_file(config_path)?;
    }

    let session = builder.build()?;
    session.save()?;

    let doc = session.document();
    let layouts = session.layouts();
    for (index, (entry, layout)) in session.navigation().iter().zip(layouts).enumerate() {
        let page = quizzer::navigation::page_for_entry(doc, entry);
        let id = page.map(|p| doc.attribute_or_empty(p, attr::ID)).unwrap_or_default();
        let complete = page.is_some_and(|p| tags::is_yes(doc.attribute(p, attr::PAGE_COMPLETE)));
        println!(
            "{:>4}  {:<20} {:<10} {:<8} {}",
            index,
            id,
            layout.to_string(),
            if complete { "complete" } else { "open" },
            serde_json::to_string(entry)?
        );
    }

    println!("{} navigation entries in {}", session.navigation().len(), quiz_path);
    Ok(())
}
