pub mod keywords;
pub mod link;

pub use keywords::*;
pub use link::*;

use html_escape::decode_html_entities;
use scraper::ElementRef;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cleaned text content of an element and all its descendants.
pub fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}
