//! Crate for remapping a whole set of classes at once.
//!
//! Remapping happens in two phases. First an [`index::InheritanceIndex`] is built from all the classes, so that
//! member references can be resolved through super classes and interfaces. Then every class is rewritten: its name,
//! its members, and every symbolic reference in the code, using the [`quill::resolver::Resolver`].
//!
//! See [`remap::remap_classes`] for the entry point.

use duke::tree::class::ClassName;
use duke::tree::method::MethodNameAndDesc;

mod bridge;
pub mod index;
pub mod remap;

/// Options for [`remap::remap_classes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapOptions {
	/// Whether to remove the bridge and synthetic flags of bridge methods, see [`DegradedBridge`].
	pub degrade_bridges: bool,
	/// Whether to rename the method implemented by lambdas and method references at `invokedynamic` sites.
	pub remap_lambda_names: bool,
	/// Whether to set the parameter names of methods from the mappings.
	pub apply_parameter_names: bool,
}

impl Default for RemapOptions {
	fn default() -> Self {
		RemapOptions {
			degrade_bridges: true,
			remap_lambda_names: true,
			apply_parameter_names: true,
		}
	}
}

/// A bridge method that had its bridge and synthetic flags removed.
///
/// All names are the ones from before remapping.
#[derive(Debug, Clone, PartialEq)]
pub struct DegradedBridge {
	pub class: ClassName,
	pub bridge: MethodNameAndDesc,
	/// The method the bridge method calls.
	pub target: MethodNameAndDesc,
}

/// What happened while remapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemapReport {
	/// The number of classes remapped.
	pub classes: usize,
	pub degraded_bridges: Vec<DegradedBridge>,
}
