//! The binding entry point.

use std::collections::HashMap;

use crate::descriptor::Bindable;
use crate::error::BindError;
use crate::registry;

/// Multi-valued source mapping, e.g. parsed query-string or form-post
/// data. Key order is irrelevant; order within a value vector is
/// significant for sequence fields.
pub type Values = HashMap<String, Vec<String>>;

/// Populate `dst` from `source` according to its field declarations.
///
/// Fields whose key is absent from `source`, or maps to an empty vector,
/// keep their prior value. Scalar fields convert the first value; sequence
/// fields convert the whole vector. The first conversion failure returns
/// immediately; fields already assigned before the failing one remain
/// mutated, by contract.
pub fn bind<T: Bindable>(dst: &mut T, source: &Values) -> Result<(), BindError> {
    let descriptors = registry::descriptors::<T>();
    for descriptor in descriptors.iter() {
        let Some(raws) = source.get(descriptor.key) else {
            continue;
        };
        if raws.is_empty() {
            continue;
        }
        dst.assign(descriptor, raws)?;
    }
    Ok(())
}
