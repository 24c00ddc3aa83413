//! Integration tests for OCR input handling and the end-to-end builder.

use serde_json::{json, Value};

use outliner::{Error, JsonFormat, OcrDocument, Outliner};

fn vertices(x: f32, y: f32, w: f32, h: f32) -> Value {
    json!({"vertices": [
        {"x": x, "y": y},
        {"x": x + w, "y": y},
        {"x": x + w, "y": y + h},
        {"x": x, "y": y + h}
    ]})
}

/// One OCR word with ten-pixel symbols and a trailing space break.
fn word(text: &str, x: f32, y: f32, lang: &str) -> Value {
    let n = text.chars().count();
    let symbols: Vec<Value> = text
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let mut symbol = json!({
                "text": c.to_string(),
                "boundingBox": vertices(x + i as f32 * 10.0, y, 10.0, 20.0),
            });
            if i + 1 == n {
                symbol["property"] = json!({"detectedBreak": {"type": "SPACE"}});
            }
            symbol
        })
        .collect();

    json!({
        "boundingBox": vertices(x, y, n as f32 * 10.0, 20.0),
        "property": {"detectedLanguages": [{"languageCode": lang}]},
        "symbols": symbols,
    })
}

/// Words of `text` flowed left to right from `x`.
fn words(text: &str, x: f32, y: f32, lang: &str) -> Vec<Value> {
    let mut cursor = x;
    text.split_whitespace()
        .map(|w| {
            let value = word(w, cursor, y, lang);
            cursor += w.chars().count() as f32 * 10.0 + 10.0;
            value
        })
        .collect()
}

fn page(words: Vec<Value>) -> Value {
    json!({
        "width": 800,
        "height": 1000,
        "blocks": [{"paragraphs": [{"words": words}]}]
    })
}

fn response(pages: Vec<Value>) -> String {
    json!({"fullTextAnnotation": {"pages": pages}}).to_string()
}

fn lecture_page() -> Value {
    let mut all = words("Roman Empire", 0.0, 0.0, "en");
    all.extend(words("Founded by Augustus", 40.0, 50.0, "en"));
    all.extend(words("Fell in the west", 40.0, 100.0, "en"));
    all.extend(words("Page notes", 600.0, 150.0, "en"));
    page(all)
}

#[test]
fn test_end_to_end_outline() {
    let result = Outliner::new()
        .sequential()
        .parse_json(&response(vec![lecture_page()]))
        .unwrap();

    assert_eq!(result.page_count(), 1);
    let text = result.to_text().unwrap();
    assert_eq!(
        text,
        "root\n\
         └── Roman Empire\n    \
             ├── Founded by Augustus\n    \
             └── Fell in the west\n\
         \n\
         Annotations:\n  • Page notes"
    );
}

#[test]
fn test_trailing_space_breaks_do_not_double_spaces() {
    let result = Outliner::new()
        .parse_json(&response(vec![lecture_page()]))
        .unwrap();
    let first = result.pages[0].outline.paragraphs().next().unwrap();
    assert_eq!(first.text, "Roman Empire ");
    assert_eq!(first.trimmed(), "Roman Empire");
}

#[test]
fn test_language_filter() {
    let mut all = words("Hello there", 0.0, 0.0, "en");
    all.extend(words("Bonjour", 0.0, 100.0, "fr"));

    let unfiltered = Outliner::new()
        .parse_json(&response(vec![page(all.clone())]))
        .unwrap();
    assert_eq!(unfiltered.stats().element_count, 3);

    let english = Outliner::new()
        .with_language("en")
        .parse_json(&response(vec![page(all)]))
        .unwrap();
    assert_eq!(english.stats().element_count, 2);
    assert!(!english.plain_text().contains("Bonjour"));
}

#[test]
fn test_batch_responses_are_separate_pages() {
    let json = json!({"responses": [
        {"fullTextAnnotation": {"pages": [page(words("First page", 0.0, 0.0, "en"))]}},
        {"fullTextAnnotation": {"pages": [page(words("Second page", 0.0, 0.0, "en"))]}}
    ]})
    .to_string();

    let doc = OcrDocument::from_json(&json).unwrap();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.word_count(), 4);
    assert!(matches!(doc.page(3), Err(Error::PageOutOfRange(3, 2))));

    let result = Outliner::new().parse_document(&doc).unwrap();
    let json = result.to_json(JsonFormat::Compact).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(2));
    assert_eq!(value[0]["entries"][0]["text"], "First page ");
}

#[test]
fn test_page_without_symbols_fails() {
    let result = Outliner::new().parse_json(&response(vec![page(Vec::new())]));
    assert!(matches!(result, Err(Error::NoGlyphs)));
}

#[test]
fn test_malformed_json_fails() {
    let result = Outliner::new().parse_json("{\"pages\": 12}");
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_parse_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.json");
    std::fs::write(&path, response(vec![lecture_page()])).unwrap();

    let markdown = Outliner::new().parse_file(&path).unwrap().to_markdown().unwrap();
    assert!(markdown.starts_with("- Roman Empire\n  - Founded by Augustus\n"));
    assert!(markdown.contains("## Annotations"));

    let missing = Outliner::new().parse_file(dir.path().join("missing.json"));
    assert!(matches!(missing, Err(Error::Io(_))));
}
