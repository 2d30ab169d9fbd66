// crates/blogpost-core/examples/playground.rs
// Run with: cargo run --example playground

use blogpost_core::fuzzy;
use blogpost_core::post::{DraftAnswers, PostDocument, slugify};
use chrono::NaiveDate;
use std::path::Path;

fn main() {
    println!("📝 Blog Post Playground\n");

    println!("=== Slugs ===");
    for title in ["Hello, World!", "  Déjà Vu  ", "Rust 2024: what's new?"] {
        println!("{:?} -> {:?}", title, slugify(title));
    }

    println!("\n=== Tag suggestions ===");
    let vocabulary: Vec<String> = ["css", "gatsby", "golang", "graphql", "javascript"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for input in ["", "ga", "gql", "jst", "zz"] {
        println!("{:>5?} -> {:?}", input, fuzzy::filter(input, &vocabulary));
    }

    println!("\n=== Rendered post ===");
    let answers = DraftAnswers {
        title: "My Post".to_string(),
        description: "A short description".to_string(),
        authors: Some(vec!["Alex".to_string()]),
        selected_tags: vec!["gatsby".to_string(), "graphql".to_string()],
        ..DraftAnswers::default()
    };
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    match PostDocument::new(Path::new("content/blog"), &answers, date) {
        Ok(document) => {
            println!("{}", document.path.display());
            print!("{}", document.body);
        }
        Err(e) => eprintln!("❌ {e}"),
    }
}
