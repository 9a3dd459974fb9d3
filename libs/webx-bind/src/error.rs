use crate::descriptor::{FieldDescriptor, FieldKind};

/// Binding error — returned by `bind` and by the individual converters.
///
/// Every failure is a deterministic function of the input and carries the
/// field key, the offending raw value, and the declared kind, so the
/// caller can present a diagnostic without any side channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("field '{field}': cannot convert {value:?} to {kind}")]
    Conversion {
        field: &'static str,
        value: String,
        kind: FieldKind,
    },

    #[error("field '{field}': unknown timezone location '{location}'")]
    Location {
        field: &'static str,
        location: &'static str,
    },

    #[error("field '{field}': no converter for declared kind")]
    Unsupported { field: &'static str },
}

impl BindError {
    /// Conversion failure for `raw` against the field's declared kind.
    pub fn conversion(descriptor: &FieldDescriptor, raw: &str) -> Self {
        BindError::Conversion {
            field: descriptor.key,
            value: raw.to_owned(),
            kind: descriptor.kind,
        }
    }

    pub fn location(descriptor: &FieldDescriptor, location: &'static str) -> Self {
        BindError::Location {
            field: descriptor.key,
            location,
        }
    }

    pub fn unsupported(field: &'static str) -> Self {
        BindError::Unsupported { field }
    }
}
