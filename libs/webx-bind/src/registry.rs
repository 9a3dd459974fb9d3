//! Process-wide descriptor registry.
//!
//! Field tables are resolved once per destination type and cached for the
//! process lifetime; entries are never invalidated. Uses interior
//! mutability so that concurrent callers can bind the same type on first
//! use: racing resolvers may build the same table redundantly, but the
//! first insert wins and later racers read the published entry.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::descriptor::{Bindable, FieldDescriptor};

/// Registry of resolved field tables, keyed by destination type identity.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    entries: RwLock<HashMap<TypeId, Arc<[FieldDescriptor]>>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached field table for `T`, resolving it on first use.
    pub fn lookup_or_resolve<T: Bindable>(&self) -> Arc<[FieldDescriptor]> {
        let id = TypeId::of::<T>();

        {
            let guard = match self.entries.read() {
                Ok(g) => g,
                Err(poisoned) => {
                    tracing::warn!("descriptor registry read lock was poisoned, recovering");
                    poisoned.into_inner()
                }
            };
            if let Some(descriptors) = guard.get(&id) {
                return Arc::clone(descriptors);
            }
        }

        // Resolved outside the lock; a racing caller may do the same work.
        let resolved: Arc<[FieldDescriptor]> = T::fields()
            .iter()
            .filter(|spec| !spec.key.is_empty())
            .map(FieldDescriptor::resolve)
            .collect();

        let mut guard = match self.entries.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("descriptor registry write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        Arc::clone(guard.entry(id).or_insert(resolved))
    }
}

static GLOBAL: OnceLock<DescriptorRegistry> = OnceLock::new();

/// Field table for `T` from the process-wide registry, created lazily on
/// first use.
pub fn descriptors<T: Bindable>() -> Arc<[FieldDescriptor]> {
    GLOBAL
        .get_or_init(DescriptorRegistry::new)
        .lookup_or_resolve::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldKind, FieldSpec, ScalarKind};
    use crate::error::BindError;

    struct Probe;

    impl Bindable for Probe {
        fn fields() -> &'static [FieldSpec] {
            const FIELDS: &[FieldSpec] = &[
                FieldSpec {
                    key: "a",
                    kind: FieldKind::Scalar(ScalarKind::Text),
                    layout: None,
                    loc: None,
                },
                FieldSpec {
                    key: "",
                    kind: FieldKind::Scalar(ScalarKind::Text),
                    layout: None,
                    loc: None,
                },
            ];
            FIELDS
        }

        fn assign(
            &mut self,
            descriptor: &FieldDescriptor,
            _raws: &[String],
        ) -> Result<(), BindError> {
            Err(BindError::unsupported(descriptor.key))
        }
    }

    #[test]
    fn resolve_excludes_empty_keys_and_caches_per_type() {
        let registry = DescriptorRegistry::new();
        let first = registry.lookup_or_resolve::<Probe>();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].key, "a");

        let second = registry.lookup_or_resolve::<Probe>();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
