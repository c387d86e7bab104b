use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("attribute '{attribute}' has {actual} entries, expected {expected}")]
    AttributeLength {
        attribute: String,
        expected: usize,
        actual: usize,
    },

    #[error("sub-mesh {sub_mesh} has {len} indices, which is not a multiple of 3")]
    MalformedTriangleList { sub_mesh: usize, len: usize },

    #[error("sub-mesh {sub_mesh} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        sub_mesh: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error(
        "blend shape '{shape}' frame {frame}: '{attribute}' has {actual} deltas, expected {expected}"
    )]
    BlendShapeFrameLength {
        shape: String,
        frame: usize,
        attribute: String,
        expected: usize,
        actual: usize,
    },

    #[error("vertex {index} was dropped by the remap but is still referenced")]
    DroppedIndex { index: u32 },

    #[error("unknown bone '{name}'")]
    MissingBone { name: String },

    #[error("mesh has no '{channel}' channel")]
    MissingChannel { channel: String },

    #[error("sub-mesh {sub_mesh}, triangle {triangle} collapsed to a degenerate triangle")]
    DegenerateTriangle { sub_mesh: usize, triangle: usize },

    #[error("cloth preset has no vertices to match against")]
    EmptyPreset,

    #[error("sample requested at step {current}, but settle was requested at step {requested}")]
    NotSettled { requested: u64, current: u64 },

    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[cfg(feature = "json")]
    #[error("failed to parse JSON: {message}")]
    JsonParse { message: String },
}

impl Error {
    pub(crate) fn attribute_length(attribute: &str, expected: usize, actual: usize) -> Self {
        Self::AttributeLength {
            attribute: attribute.to_string(),
            expected,
            actual,
        }
    }
}
