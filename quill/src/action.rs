//! Operations on [`Mappings`][crate::tree::mappings::Mappings].
//!
//! All of them leave the input untouched and return new mappings.

mod clean;
mod conversion;
mod join;
mod mediator;
mod reverse;

use std::hash::Hash;
use indexmap::{IndexMap, IndexSet};

/// Collects the keys of both maps, in order, first the ones of `a`, then the remaining ones of `b`.
fn key_union<'a, K, V, W>(a: Option<&'a IndexMap<K, V>>, b: Option<&'a IndexMap<K, W>>) -> IndexSet<&'a K>
where
	K: Hash + Eq,
{
	let keys_a = a.into_iter().flat_map(|x| x.keys());
	let keys_b = b.into_iter().flat_map(|x| x.keys());

	keys_a.chain(keys_b).collect()
}
