//! Configuration options for document extraction.
//!
//! The `Options` struct controls the optional parts of extraction, currently
//! the external legacy-DOC converter and how its output is post-processed.

/// Configuration options for document extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_docparser::Options;
///
/// // Never shell out; always use the lossy byte-split path for .doc files
/// let options = Options {
///     use_doc_converter: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Try the external legacy-DOC converter before the lossy fallback.
    ///
    /// A converter that is not installed is not an error; the fallback runs.
    ///
    /// Default: `true`
    pub use_doc_converter: bool,

    /// Program invoked to convert legacy DOC files to DocBook XML.
    ///
    /// Default: `"antiword"`
    pub doc_converter_program: String,

    /// Arguments passed to the converter before the input file path.
    ///
    /// Default: `["-x", "db"]` (DocBook output)
    pub doc_converter_args: Vec<String>,

    /// Remove newlines from, and trim, markup derived from converter output.
    ///
    /// Keeps the result on one line for embedding in editors.
    ///
    /// Default: `true`
    pub flatten_docbook_output: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            use_doc_converter: true,
            doc_converter_program: "antiword".to_string(),
            doc_converter_args: vec!["-x".to_string(), "db".to_string()],
            flatten_docbook_output: true,
        }
    }
}
