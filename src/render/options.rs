//! Rendering options and configuration.

use super::CleanupOptions;

/// Options for rendering a reconstruction.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Deepest layer to render (`None` renders every layer)
    pub max_depth: Option<usize>,

    /// Render the annotation list after the tree
    pub include_annotations: bool,

    /// Render fragments after the annotations
    pub include_fragments: bool,

    /// Prefix each node with its label
    pub show_labels: bool,

    /// Spaces per nesting level
    pub indent_width: usize,

    /// Character to use for list markers in Markdown
    pub list_marker: char,

    /// Text cleanup options
    pub cleanup: Option<CleanupOptions>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit rendering to the first `depth` layers.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Include or omit the annotation list.
    pub fn with_annotations(mut self, include: bool) -> Self {
        self.include_annotations = include;
        self
    }

    /// Include or omit fragments.
    pub fn with_fragments(mut self, include: bool) -> Self {
        self.include_fragments = include;
        self
    }

    /// Show or hide node labels.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Set the indentation per level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: super::CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// Check whether a node in `layer` should be rendered.
    pub fn includes_layer(&self, layer: usize) -> bool {
        self.max_depth.map_or(true, |max| layer <= max)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            include_annotations: true,
            include_fragments: false,
            show_labels: false,
            indent_width: 2,
            list_marker: '-',
            cleanup: Some(CleanupOptions::default()),
        }
    }
}
