use typed_builder::TypedBuilder;

/// Controls how lenient record decoding is.
///
/// # Example
/// ```
/// use gsf::DecodeOptions;
///
/// let strict = DecodeOptions::builder().strict_array_widths(true).build();
/// assert!(strict.strict_array_widths);
/// assert!(!DecodeOptions::default().strict_array_widths);
/// ```
#[derive(TypedBuilder, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// When true, a ping array subrecord whose scale factor width is not supported for
    /// that array fails the ping with [crate::Error::UnsupportedArrayWidth]. Otherwise the
    /// array is left empty and a [crate::ping::DecodeWarning] is attached to the ping.
    #[builder(default = false)]
    pub strict_array_widths: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
