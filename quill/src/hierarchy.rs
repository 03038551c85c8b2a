//! Knowledge about the inheritance hierarchy of classes.
//!
//! A [`ClassHierarchyView`] answers, for a class name, what the super class and the interfaces of that class are,
//! and which fields and methods it declares. Not knowing a class is not an error: the class is then taken to
//! have no further super classes.

use indexmap::IndexMap;
use duke::tree::class::{ClassName, ClassNameSlice};
use duke::tree::field::{FieldAccess, FieldDescriptor, FieldDescriptorSlice, FieldName, FieldNameSlice};
use duke::tree::method::{MethodAccess, MethodDescriptor, MethodDescriptorSlice, MethodName, MethodNameSlice};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
	pub name: FieldName,
	pub desc: FieldDescriptor,
	pub access: FieldAccess,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
	pub name: MethodName,
	pub desc: MethodDescriptor,
	pub access: MethodAccess,
}

impl MethodInfo {
	/// Whether a method in a subclass with the same name and descriptor overrides this one.
	pub fn is_inheritable(&self) -> bool {
		!self.access.is_private && !self.access.is_static && !self.access.is_final
	}
}

/// The inheritance information of a single class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassInfo {
	pub super_class: Option<ClassName>,
	pub interfaces: Vec<ClassName>,
	pub fields: Vec<FieldInfo>,
	pub methods: Vec<MethodInfo>,
}

impl ClassInfo {
	pub fn get_field(&self, name: &FieldNameSlice, desc: &FieldDescriptorSlice) -> Option<&FieldInfo> {
		self.fields.iter().find(|field| field.name == *name && field.desc == *desc)
	}

	pub fn get_method(&self, name: &MethodNameSlice, desc: &MethodDescriptorSlice) -> Option<&MethodInfo> {
		self.methods.iter().find(|method| method.name == *name && method.desc == *desc)
	}

	/// The fields that can be accessed from other classes, that is all non-private ones.
	pub fn accessible_fields(&self) -> impl Iterator<Item=&FieldInfo> {
		self.fields.iter().filter(|field| !field.access.is_private)
	}

	/// The methods that subclasses can override, that is the non-private, non-static and non-final ones.
	pub fn inheritable_methods(&self) -> impl Iterator<Item=&MethodInfo> {
		self.methods.iter().filter(|method| method.is_inheritable())
	}
}

pub trait ClassHierarchyView {
	/// Looks up the inheritance information of a class.
	///
	/// Returns `None` if the class isn't known.
	fn lookup(&self, class: &ClassNameSlice) -> Option<&ClassInfo>;
}

impl<T: ClassHierarchyView + ?Sized> ClassHierarchyView for &T {
	fn lookup(&self, class: &ClassNameSlice) -> Option<&ClassInfo> {
		(**self).lookup(class)
	}
}

/// A view that doesn't know any class.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoHierarchy;

impl ClassHierarchyView for NoHierarchy {
	fn lookup(&self, _class: &ClassNameSlice) -> Option<&ClassInfo> {
		None
	}
}

/// The classes of a platform or library, like the classes of a specific java version.
#[derive(Debug, Clone, Default)]
pub struct PlatformHierarchy {
	/// Describes the platform, for example `java 17`.
	pub label: String,
	pub classes: IndexMap<ClassName, ClassInfo>,
}

impl PlatformHierarchy {
	pub fn new(label: impl Into<String>) -> PlatformHierarchy {
		PlatformHierarchy {
			label: label.into(),
			classes: IndexMap::new(),
		}
	}

	pub fn insert(&mut self, class: ClassName, info: ClassInfo) -> &mut Self {
		self.classes.insert(class, info);
		self
	}
}

impl ClassHierarchyView for PlatformHierarchy {
	fn lookup(&self, class: &ClassNameSlice) -> Option<&ClassInfo> {
		self.classes.get(class)
	}
}

/// Asks `first`, and if that one doesn't know a class, asks `second`.
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
	pub first: A,
	pub second: B,
}

impl<A, B> Layered<A, B> {
	pub fn new(first: A, second: B) -> Layered<A, B> {
		Layered { first, second }
	}
}

impl<A: ClassHierarchyView, B: ClassHierarchyView> ClassHierarchyView for Layered<A, B> {
	fn lookup(&self, class: &ClassNameSlice) -> Option<&ClassInfo> {
		self.first.lookup(class).or_else(|| self.second.lookup(class))
	}
}
