use indexmap::IndexMap;
use duke::tree::class::{ClassName, ClassNameSlice};
use duke::tree::method::{MethodDescriptor, MethodDescriptorSlice, MethodName, MethodNameSlice};
use crate::tree::mappings::{MemberKeyRef, MethodKey};

/// Checked exceptions of methods, coming from outside of the mappings.
///
/// These are merged into the `throws` list of the methods while rewriting, and keep method entries alive
/// in [`Mappings::clean_retaining`][crate::tree::mappings::Mappings::clean_retaining].
/// All names are the ones from before renaming.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExceptionSupplement {
	methods: IndexMap<ClassName, IndexMap<MethodKey, Vec<ClassName>>>,
}

impl ExceptionSupplement {
	pub fn new() -> ExceptionSupplement {
		ExceptionSupplement::default()
	}

	/// Adds exceptions for a method, after the ones already there.
	pub fn insert(&mut self, class: ClassName, name: MethodName, desc: MethodDescriptor, exceptions: impl IntoIterator<Item=ClassName>) {
		self.methods.entry(class).or_default()
			.entry(MethodKey { name, desc }).or_default()
			.extend(exceptions);
	}

	pub fn get(&self, class: &ClassNameSlice, name: &MethodNameSlice, desc: &MethodDescriptorSlice) -> Option<&[ClassName]> {
		self.methods.get(class)?
			.get(&MemberKeyRef::new(name, desc))
			.map(Vec::as_slice)
	}

	pub fn is_empty(&self) -> bool {
		self.methods.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item=(&ClassName, &MethodKey, &[ClassName])> {
		self.methods.iter()
			.flat_map(|(class, methods)| methods.iter().map(move |(key, exceptions)| (class, key, exceptions.as_slice())))
	}
}
