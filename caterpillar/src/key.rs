use alloc::string::String;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Free cells keyed by reuse identifier.
#[cfg(feature = "std")]
pub(crate) type PoolMap<V> = HashMap<String, V>;
#[cfg(not(feature = "std"))]
pub(crate) type PoolMap<V> = BTreeMap<String, V>;
