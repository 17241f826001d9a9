//! Comparison functions, sort orders and the comparer registry.
//!
//! Every assertion that compares values accepts an optional comparison function.
//! `None` means "use the default": `PartialEq`/`PartialOrd` for the free functions,
//! or whatever was registered in a [`ComparerRegistry`] for [`Verifier`] calls.
//!
//! [`Verifier`]: crate::sequence::Verifier

use std::any::{Any, TypeId, type_name};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Shared equality function.
pub type EqualityFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Shared three-way ordering function.
pub type OrderingFn<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Expected ordering of consecutive elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Each element is greater than or equal to the previous one.
    Increasing,
    /// Each element is strictly greater than the previous one.
    StrictlyIncreasing,
    /// Each element is less than or equal to the previous one.
    Decreasing,
    /// Each element is strictly less than the previous one.
    StrictlyDecreasing,
}

impl SortOrder {
    /// All orders.
    pub const ALL: [SortOrder; 4] = [
        Self::Increasing,
        Self::StrictlyIncreasing,
        Self::Decreasing,
        Self::StrictlyDecreasing,
    ];

    /// Check `compare(current, previous)` against this order.
    pub fn accepts(self, delta: Ordering) -> bool {
        match self {
            Self::Increasing => delta.is_ge(),
            Self::StrictlyIncreasing => delta.is_gt(),
            Self::Decreasing => delta.is_le(),
            Self::StrictlyDecreasing => delta.is_lt(),
        }
    }

    /// Human-readable description used in failure reports.
    pub fn description(self) -> &'static str {
        match self {
            Self::Increasing => {
                "Increasing (the next element is greater than or equal to the previous element)"
            }
            Self::StrictlyIncreasing => {
                "Strictly Increasing (the next element is strictly greater than the previous element)"
            }
            Self::Decreasing => {
                "Decreasing (the next element is less than or equal to the previous element)"
            }
            Self::StrictlyDecreasing => {
                "Strictly Decreasing (the next element is strictly less than the previous element)"
            }
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Explicit store of custom comparers keyed by element type.
///
/// Created empty and mutated only through [`register_equality`],
/// [`register_ordering`] and [`unregister`]. Share a finished registry behind an
/// `Arc`; nothing here is global.
///
/// [`register_equality`]: ComparerRegistry::register_equality
/// [`register_ordering`]: ComparerRegistry::register_ordering
/// [`unregister`]: ComparerRegistry::unregister
#[derive(Default)]
pub struct ComparerRegistry {
    equalities: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    orderings: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ComparerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the equality used for `T`.
    pub fn register_equality<T, F>(&mut self, equality: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let equality: EqualityFn<T> = Arc::new(equality);
        self.equalities.insert(TypeId::of::<T>(), Box::new(equality));
        self
    }

    /// Register (or replace) the ordering used for `T`.
    ///
    /// An ordering also serves as equality (`Ordering::Equal`) when no explicit
    /// equality is registered.
    pub fn register_ordering<T, F>(&mut self, ordering: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        let ordering: OrderingFn<T> = Arc::new(ordering);
        self.orderings.insert(TypeId::of::<T>(), Box::new(ordering));
        self
    }

    /// Register the natural `Ord` ordering for `T`.
    pub fn register_natural_ordering<T: Ord + 'static>(&mut self) -> &mut Self {
        self.register_ordering::<T, _>(|a, b| a.cmp(b))
    }

    /// Remove every comparer registered for `T`. Returns whether anything was removed.
    pub fn unregister<T: 'static>(&mut self) -> bool {
        let id = TypeId::of::<T>();
        let removed_equality = self.equalities.remove(&id).is_some();
        let removed_ordering = self.orderings.remove(&id).is_some();
        removed_equality || removed_ordering
    }

    /// Ordering registered for `T`.
    pub fn ordering<T: 'static>(&self) -> Option<OrderingFn<T>> {
        self.orderings
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<OrderingFn<T>>())
            .cloned()
    }

    /// Equality registered for `T`, derived from a registered ordering if needed.
    pub fn equality<T: 'static>(&self) -> Option<EqualityFn<T>> {
        if let Some(equality) = self
            .equalities
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<EqualityFn<T>>())
        {
            return Some(Arc::clone(equality));
        }
        self.ordering::<T>().map(|ordering| {
            let equality: EqualityFn<T> = Arc::new(move |a: &T, b: &T| ordering(a, b).is_eq());
            equality
        })
    }

    /// Number of types with at least one registered comparer.
    pub fn len(&self) -> usize {
        let mut ids: Vec<&TypeId> = self.equalities.keys().chain(self.orderings.keys()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.equalities.is_empty() && self.orderings.is_empty()
    }
}

impl fmt::Debug for ComparerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparerRegistry")
            .field("equalities", &self.equalities.len())
            .field("orderings", &self.orderings.len())
            .finish()
    }
}

/// Element type name for diagnostics, without leading references.
pub(crate) fn subject_type_name<T: ?Sized>() -> &'static str {
    type_name::<T>().trim_start_matches('&')
}
