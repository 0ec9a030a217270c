use thiserror::Error;

/// Core pipeline failures. Collaborator code wraps these with `anyhow`
/// context on the way up; the variants stay downcastable so callers can
/// tell them apart and decide how to react.
#[derive(Debug, Error)]
pub enum CloakError {
    /// The requested cloak color is not in the registry. Unknown names
    /// are rejected outright rather than silently mapped to a default.
    #[error("unknown cloak color '{0}'")]
    UnknownColor(String),

    /// The frame source stopped yielding frames before background
    /// capture finished.
    #[error("frame source stopped after {captured} of {requested} background frames")]
    Capture { captured: usize, requested: usize },

    /// Current frame, background, and mask must all share one size.
    /// A mismatch is a caller bug; frames are never cropped or resized
    /// to paper over it.
    #[error("dimension mismatch: current {current:?}, background {background:?}, mask {mask:?}")]
    DimensionMismatch {
        current: (u32, u32),
        background: (u32, u32),
        mask: (u32, u32),
    },

    /// The frame source is not open.
    #[error("frame source is not open")]
    SourceUnavailable,
}
