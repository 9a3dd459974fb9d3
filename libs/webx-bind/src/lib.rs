pub mod binder;
pub mod convert;
pub mod descriptor;

pub use webx_bind_derive::Bindable;
pub mod error;
pub mod registry;

pub use binder::{Values, bind};
pub use descriptor::{Bindable, FieldDescriptor, FieldKind, FieldSpec, ScalarKind};
pub use error::BindError;
