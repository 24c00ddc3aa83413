//! JSON rendering for reconstructed pages.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{GlyphMetrics, LayoutStats, OutlineEntry, Paragraph, Reconstruction};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialized shape of one page: the tree as nested entries instead of the
/// arena it is stored in.
#[derive(Serialize)]
struct PageView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<usize>,
    metrics: &'a GlyphMetrics,
    entries: Vec<OutlineEntry>,
    annotations: &'a [Paragraph],
    fragments: &'a [Paragraph],
    stats: &'a LayoutStats,
}

impl<'a> PageView<'a> {
    fn new(reconstruction: &'a Reconstruction, page: Option<usize>) -> Self {
        Self {
            page,
            metrics: &reconstruction.metrics,
            entries: reconstruction.outline.to_entries(),
            annotations: &reconstruction.annotations,
            fragments: &reconstruction.fragments,
            stats: &reconstruction.stats,
        }
    }
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a reconstruction to JSON.
pub fn to_json(reconstruction: &Reconstruction, format: JsonFormat) -> Result<String> {
    serialize(&PageView::new(reconstruction, None), format)
}

/// Convert several pages to a JSON array, numbering pages from 1.
pub fn to_json_pages(pages: &[Reconstruction], format: JsonFormat) -> Result<String> {
    let views: Vec<PageView<'_>> = pages
        .iter()
        .enumerate()
        .map(|(i, r)| PageView::new(r, Some(i + 1)))
        .collect();
    serialize(&views, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Outline, Point, Rect};

    fn sample() -> Reconstruction {
        let mut r = Reconstruction::empty(GlyphMetrics::new(10.0, 20.0));
        let paragraph = Paragraph {
            text: "Header".to_string(),
            bounding_box: Rect::new(Point::new(0.0, 0.0), Point::new(60.0, 20.0)),
            members: Vec::new(),
            line_count: 1,
        };
        r.outline
            .add_child(Outline::ROOT, paragraph, 1, "layer 1, child 0")
            .unwrap();
        r
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"entries\""));
        assert!(json.contains("layer 1, child 0"));
        assert!(json.contains('\n'));
        assert!(!json.contains("\"page\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["entries"][0]["text"], "Header");
        assert_eq!(value["annotations"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_to_json_pages() {
        let json = to_json_pages(&[sample(), sample()], JsonFormat::Compact).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["page"], 2);
    }
}
