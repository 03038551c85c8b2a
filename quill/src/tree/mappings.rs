use std::borrow::Borrow;
use anyhow::Result;
use indexmap::{IndexMap, IndexSet};
use duke::tree::class::{ClassName, ClassNameSlice};
use duke::tree::field::{FieldName, FieldNameSlice};
use duke::tree::method::{MethodDescriptor, MethodDescriptorSlice, MethodName, MethodNameSlice, ParameterName};
use crate::error::MappingError;

/// A key of a member, consisting out of its name and descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberKey<N, D> {
	pub name: N,
	pub desc: D,
}

pub type MethodKey = MemberKey<MethodName, MethodDescriptor>;

/// A borrowed [`MemberKey`], for looking up entries without allocating.
///
/// This hashes the same way as the owned key does.
#[derive(Debug, Hash)]
pub struct MemberKeyRef<'a, N: ?Sized, D: ?Sized> {
	pub name: &'a N,
	pub desc: &'a D,
}

impl<'a, N: ?Sized, D: ?Sized> MemberKeyRef<'a, N, D> {
	pub fn new(name: &'a N, desc: &'a D) -> Self {
		MemberKeyRef { name, desc }
	}
}

impl<N, D, NS, DS> indexmap::Equivalent<MemberKey<N, D>> for MemberKeyRef<'_, NS, DS>
where
	N: Borrow<NS>,
	D: Borrow<DS>,
	NS: ?Sized + PartialEq,
	DS: ?Sized + PartialEq,
{
	fn equivalent(&self, key: &MemberKey<N, D>) -> bool {
		self.name == <N as Borrow<NS>>::borrow(&key.name) && self.desc == <D as Borrow<DS>>::borrow(&key.desc)
	}
}

/// Additional data about a method: the checked exceptions it declares and the names of its parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodExtra {
	pub exceptions: IndexSet<ClassName>,
	pub parameters: Vec<ParameterName>,
}

impl MethodExtra {
	pub fn is_empty(&self) -> bool {
		self.exceptions.is_empty() && self.parameters.is_empty()
	}
}

/// An immutable table of renames.
///
/// Classes are keyed by their old name. Fields and methods are keyed by the old name of the class declaring
/// them, and their old name (and for methods, their old descriptor).
///
/// Looking up a class is total: a class without an entry keeps its name. Looking up fields and methods tells
/// apart a missing entry from one that maps a name to itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mappings {
	pub(crate) classes: IndexMap<ClassName, ClassName>,
	pub(crate) fields: IndexMap<ClassName, IndexMap<FieldName, FieldName>>,
	pub(crate) methods: IndexMap<ClassName, IndexMap<MethodKey, MethodName>>,
	pub(crate) method_extra: IndexMap<ClassName, IndexMap<MethodKey, MethodExtra>>,
}

impl Mappings {
	pub fn builder() -> MappingsBuilder {
		MappingsBuilder::default()
	}

	pub fn classes(&self) -> &IndexMap<ClassName, ClassName> {
		&self.classes
	}

	pub fn fields(&self) -> &IndexMap<ClassName, IndexMap<FieldName, FieldName>> {
		&self.fields
	}

	pub fn methods(&self) -> &IndexMap<ClassName, IndexMap<MethodKey, MethodName>> {
		&self.methods
	}

	pub fn method_extra(&self) -> &IndexMap<ClassName, IndexMap<MethodKey, MethodExtra>> {
		&self.method_extra
	}

	/// Gets the new name of a class, or the old name if there's no entry for it.
	pub fn get_class_name<'a>(&'a self, class: &'a ClassNameSlice) -> &'a ClassNameSlice {
		self.get_class_name_fail(class).unwrap_or(class)
	}

	pub fn get_class_name_fail(&self, class: &ClassNameSlice) -> Option<&ClassNameSlice> {
		self.classes.get(class).map(|x| x.as_slice())
	}

	pub fn get_field_name(&self, class: &ClassNameSlice, field: &FieldNameSlice) -> Option<&FieldNameSlice> {
		self.fields.get(class)?
			.get(field)
			.map(|x| x.as_slice())
	}

	pub fn get_method_name(&self, class: &ClassNameSlice, method: &MethodNameSlice, desc: &MethodDescriptorSlice) -> Option<&MethodNameSlice> {
		self.methods.get(class)?
			.get(&MemberKeyRef::new(method, desc))
			.map(|x| x.as_slice())
	}

	pub fn get_method_extra(&self, class: &ClassNameSlice, method: &MethodNameSlice, desc: &MethodDescriptorSlice) -> Option<&MethodExtra> {
		self.method_extra.get(class)?
			.get(&MemberKeyRef::new(method, desc))
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty() && self.fields.is_empty() && self.methods.is_empty() && self.method_extra.is_empty()
	}
}

/// A builder for [`Mappings`].
///
/// Taking a snapshot with [`MappingsBuilder::build`] copies the contents, so adding more entries to the builder
/// afterwards doesn't change any earlier snapshot. Adding an entry for an existing key replaces the old entry.
#[derive(Debug, Clone, Default)]
pub struct MappingsBuilder {
	mappings: Mappings,
}

impl MappingsBuilder {
	pub fn new() -> MappingsBuilder {
		MappingsBuilder::default()
	}

	pub fn add_class(&mut self, from: ClassName, to: ClassName) -> &mut Self {
		self.mappings.classes.insert(from, to);
		self
	}

	pub fn add_field(&mut self, class: ClassName, from: FieldName, to: FieldName) -> &mut Self {
		self.mappings.fields.entry(class).or_default().insert(from, to);
		self
	}

	pub fn add_method(&mut self, class: ClassName, from: MethodName, desc: MethodDescriptor, to: MethodName) -> &mut Self {
		self.mappings.methods.entry(class).or_default().insert(MethodKey { name: from, desc }, to);
		self
	}

	fn extra_mut(&mut self, class: ClassName, name: MethodName, desc: MethodDescriptor) -> &mut MethodExtra {
		self.mappings.method_extra.entry(class).or_default()
			.entry(MethodKey { name, desc }).or_default()
	}

	/// Adds checked exceptions to a method, keeping the ones already added.
	pub fn add_method_exceptions(
		&mut self,
		class: ClassName,
		name: MethodName,
		desc: MethodDescriptor,
		exceptions: impl IntoIterator<Item=ClassName>,
	) -> &mut Self {
		self.extra_mut(class, name, desc).exceptions.extend(exceptions);
		self
	}

	/// Sets the parameter names of a method.
	pub fn add_method_parameters(&mut self, class: ClassName, name: MethodName, desc: MethodDescriptor, parameters: Vec<ParameterName>) -> &mut Self {
		self.extra_mut(class, name, desc).parameters = parameters;
		self
	}

	pub(crate) fn add_method_extra(&mut self, class: ClassName, key: MethodKey, extra: MethodExtra) -> &mut Self {
		let existing = self.extra_mut(class, key.name, key.desc);
		existing.exceptions.extend(extra.exceptions);
		if !extra.parameters.is_empty() {
			existing.parameters = extra.parameters;
		}
		self
	}

	/// Adds a class mapping from text, checking that both names are valid class names.
	///
	/// Fails with [`MappingError::MalformedMappingInput`].
	pub fn add_class_text(&mut self, from: &str, to: &str) -> Result<&mut Self> {
		let from = parse(from)?;
		let to = parse(to)?;
		Ok(self.add_class(from, to))
	}

	/// Adds a field mapping from text, checking all the names.
	///
	/// Fails with [`MappingError::MalformedMappingInput`].
	pub fn add_field_text(&mut self, class: &str, from: &str, to: &str) -> Result<&mut Self> {
		let class = parse(class)?;
		let from = parse(from)?;
		let to = parse(to)?;
		Ok(self.add_field(class, from, to))
	}

	/// Adds a method mapping from text, checking all the names and the descriptor.
	///
	/// Fails with [`MappingError::MalformedMappingInput`].
	pub fn add_method_text(&mut self, class: &str, from: &str, desc: &str, to: &str) -> Result<&mut Self> {
		let class = parse(class)?;
		let from = parse(from)?;
		let desc = parse(desc)?;
		let to = parse(to)?;
		Ok(self.add_method(class, from, desc, to))
	}

	pub fn has_class(&self, class: &ClassNameSlice) -> bool {
		self.mappings.classes.contains_key(class)
	}

	pub fn has_field(&self, class: &ClassNameSlice, field: &FieldNameSlice) -> bool {
		self.mappings.get_field_name(class, field).is_some()
	}

	pub fn has_method(&self, class: &ClassNameSlice, method: &MethodNameSlice, desc: &MethodDescriptorSlice) -> bool {
		self.mappings.get_method_name(class, method, desc).is_some()
	}

	/// Takes a snapshot of the current contents.
	pub fn build(&self) -> Mappings {
		self.mappings.clone()
	}

	/// Like [`MappingsBuilder::build`], but without copying.
	pub fn into_mappings(self) -> Mappings {
		self.mappings
	}
}

fn parse<T>(input: &str) -> Result<T>
where
	for<'a> T: TryFrom<&'a str, Error=anyhow::Error>,
{
	T::try_from(input).map_err(|e| MappingError::malformed(input, &e).into())
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use duke::tree::class::ClassName;
	use duke::tree::field::FieldNameSlice;
	use duke::tree::method::{MethodDescriptorSlice, MethodNameSlice};
	use crate::error::MappingError;
	use crate::tree::mappings::Mappings;

	#[test]
	fn lookups() -> Result<()> {
		let mappings = Mappings::builder()
			.add_class_text("a", "b")?
			.add_field_text("a", "f", "f")?
			.add_method_text("a", "m", "(La;)V", "run")?
			.build();

		let unknown = ClassName::try_from("zzz")?;
		assert_eq!(mappings.get_class_name(&unknown), "zzz");
		let a = ClassName::try_from("a")?;
		assert_eq!(mappings.get_class_name(&a), "b");

		// a self-mapping is still an entry
		let f: &FieldNameSlice = <&FieldNameSlice>::try_from("f")?;
		let g: &FieldNameSlice = <&FieldNameSlice>::try_from("g")?;
		assert_eq!(mappings.get_field_name(&a, f).map(|x| x.as_str()), Some("f"));
		assert_eq!(mappings.get_field_name(&a, g), None);

		let m = <&MethodNameSlice>::try_from("m")?;
		let desc = <&MethodDescriptorSlice>::try_from("(La;)V")?;
		let other_desc = <&MethodDescriptorSlice>::try_from("()V")?;
		assert_eq!(mappings.get_method_name(&a, m, desc).map(|x| x.as_str()), Some("run"));
		assert_eq!(mappings.get_method_name(&a, m, other_desc), None);
		Ok(())
	}

	#[test]
	fn malformed_input() {
		let mut builder = Mappings::builder();
		let e = builder.add_method_text("a", "m", "(La;V", "run").unwrap_err();
		assert_eq!(
			e.downcast_ref::<MappingError>().map(|MappingError::MalformedMappingInput { input, .. }| input.as_str()),
			Some("(La;V")
		);
		let a = ClassName::try_from("a").unwrap();
		let m = <&MethodNameSlice>::try_from("m").unwrap();
		let desc = <&MethodDescriptorSlice>::try_from("(La;)V").unwrap();
		assert!(!builder.has_method(&a, m, desc));
	}
}
