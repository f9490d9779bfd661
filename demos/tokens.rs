//! Dumps the token arena of an SEDF document.
//!
//! Run with: cargo run --example tokens [path]
//!
//! Without a path a small built-in document is used.

use serde_sedf::{tokenize, Token};
use std::error::Error;
use std::{env, fs};

const SAMPLE: &str = r#"; inventory
(:name "Widget"
 :price 9.5
 :tags #(new :sale)
 :stock (:warehouse 12 :store nil))
"#;

fn describe(input: &[u8], index: usize, token: &Token) -> String {
    let span = match token.end {
        Some(end) => format!("{}..{}", token.start, end),
        None => format!("{}..", token.start),
    };
    let parent = token
        .parent
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    let mut line = format!(
        "{index:>3} {:<9} {span:<9} size={:<2} parent={parent:<2}",
        token.kind.as_str(),
        token.size
    );
    if !token.is_composite() {
        if let Some(text) = token.text(input) {
            line.push(' ');
            line.push_str(&String::from_utf8_lossy(text));
        }
    }
    line
}

fn main() -> Result<(), Box<dyn Error>> {
    let input = match env::args().nth(1) {
        Some(path) => fs::read(path)?,
        None => SAMPLE.as_bytes().to_vec(),
    };

    let tokens = tokenize(&input)?;
    println!("{} tokens:", tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        println!("{}", describe(&input, index, token));
    }

    Ok(())
}
