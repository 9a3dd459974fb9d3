use std::fmt;

use crate::error::BindError;

/// Scalar conversion kind of a bound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Int,
    Uint,
    Bool,
    Duration,
    DateTime,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Text => "text",
            ScalarKind::Int => "integer",
            ScalarKind::Uint => "unsigned integer",
            ScalarKind::Bool => "boolean",
            ScalarKind::Duration => "duration",
            ScalarKind::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

/// Declared kind of a bound field: a single scalar (first value wins)
/// or a sequence converted element-wise from the whole value vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    Seq(ScalarKind),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(kind) => kind.fmt(f),
            FieldKind::Seq(kind) => write!(f, "sequence of {kind}"),
        }
    }
}

/// Raw per-field declaration.
///
/// Emitted as a static table by `#[derive(Bindable)]`; a hand-written
/// `Bindable` impl declares the same `(key, kind, options)` tuples
/// explicitly. A spec with an empty `key` is excluded at resolve time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Lookup key in the source mapping.
    pub key: &'static str,
    pub kind: FieldKind,
    /// strftime-style format pattern. Datetime fields only.
    pub layout: Option<&'static str>,
    /// Timezone name (IANA database). Datetime fields only; UTC when absent.
    pub loc: Option<&'static str>,
}

/// Resolved descriptor for one bound field.
///
/// The unit the binder iterates: converters read `layout`/`loc` from it and
/// use `key`/`kind` for error context. Produced from `FieldSpec` by the
/// registry, once per destination type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub kind: FieldKind,
    pub layout: Option<&'static str>,
    pub loc: Option<&'static str>,
}

impl FieldDescriptor {
    pub(crate) fn resolve(spec: &FieldSpec) -> Self {
        Self {
            key: spec.key,
            kind: spec.kind,
            layout: spec.layout,
            loc: spec.loc,
        }
    }
}

/// A destination type the binder can populate.
///
/// Implemented by `#[derive(Bindable)]`, which generates the static field
/// table and a typed assignment dispatcher. Both methods may also be
/// written by hand for types outside the derive's supported shapes; the
/// binder treats the two identically.
pub trait Bindable: 'static {
    /// Per-field declarations in declaration order.
    fn fields() -> &'static [FieldSpec];

    /// Convert `raws` according to `descriptor` and assign into the
    /// matching field. The binder never calls this with an empty `raws`.
    fn assign(
        &mut self,
        descriptor: &FieldDescriptor,
        raws: &[String],
    ) -> Result<(), BindError>;
}
