//! Finding the class that owns the rename of a member reference.
//!
//! A field or method reference names the class it's referenced on (the "site"), which is not necessarily the class
//! declaring the member. The [`Resolver`] walks the inheritance hierarchy, in this order:
//! - the site class,
//! - the interfaces of the site class, depth first, in the order they're declared,
//! - the super class, then its interfaces (again depth first), then its super class, and so on.
//!
//! So at each level of the super class chain, the interfaces of that class are visited before going up to the next
//! super class, instead of walking the whole super class chain first.
//!
//! Each class is visited at most once, so the walk terminates even for cyclic hierarchies.
//!
//! The mapping entry of the site class is always used. For every other class, the member must be declared there,
//! not be private, and for instance accesses also not be static. The first such class with a mapping entry wins.

use anyhow::Result;
use indexmap::IndexSet;
use log::trace;
use duke::tree::class::{ClassName, ClassNameSlice};
use duke::tree::field::{FieldDescriptorSlice, FieldName, FieldNameSlice};
use duke::tree::method::{MethodAccess, MethodDescriptorSlice, MethodName, MethodNameSlice};
use crate::hierarchy::{ClassHierarchyView, ClassInfo, MethodInfo};
use crate::remapper::{ARemapper, BRemapper};
use crate::tree::mappings::Mappings;

/// The result of resolving a member: the class the mapping entry was found on, and the new name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<N> {
	pub owner: ClassName,
	pub name: N,
}

#[derive(Debug)]
pub struct Resolver<'a, H: ?Sized> {
	mappings: &'a Mappings,
	hierarchy: &'a H,
}

impl<'a, H: ClassHierarchyView + ?Sized> Resolver<'a, H> {
	pub fn new(mappings: &'a Mappings, hierarchy: &'a H) -> Resolver<'a, H> {
		Resolver { mappings, hierarchy }
	}

	pub fn mappings(&self) -> &'a Mappings {
		self.mappings
	}

	/// Visits the classes in resolution order, until `visit` returns `Some`.
	///
	/// The `bool` given to `visit` is `true` only for the site class.
	fn walk<T, F>(&self, site: &ClassNameSlice, mut visit: F) -> Option<T>
	where
		F: FnMut(&ClassNameSlice, Option<&ClassInfo>, bool) -> Option<T>,
	{
		let mut visited: IndexSet<ClassName> = IndexSet::new();
		let mut current = Some(site.to_owned());
		let mut is_site = true;

		while let Some(class) = current.take() {
			if !visited.insert(class.clone()) {
				break;
			}

			let info = self.hierarchy.lookup(&class);
			if let Some(found) = visit(&class, info, is_site) {
				return Some(found);
			}
			is_site = false;

			let Some(info) = info else {
				break;
			};

			let mut stack: Vec<&ClassNameSlice> = info.interfaces.iter().rev().map(|x| x.as_slice()).collect();
			while let Some(interface) = stack.pop() {
				if visited.contains(interface) {
					continue;
				}
				visited.insert(interface.to_owned());

				let interface_info = self.hierarchy.lookup(interface);
				if let Some(found) = visit(interface, interface_info, false) {
					return Some(found);
				}
				if let Some(interface_info) = interface_info {
					stack.extend(interface_info.interfaces.iter().rev().map(|x| x.as_slice()));
				}
			}

			current = info.super_class.clone();
		}

		None
	}

	/// Resolves a field reference.
	///
	/// Returns `None` if no class in the hierarchy has a mapping for it, in which case the name is kept.
	pub fn resolve_field(&self, site: &ClassNameSlice, name: &FieldNameSlice, desc: &FieldDescriptorSlice, is_static: bool)
			-> Option<Resolved<FieldName>> {
		self.walk(site, |class, info, is_site| {
			let is_candidate = is_site || info.and_then(|info| info.get_field(name, desc))
				.is_some_and(|field| !field.access.is_private && (is_static || !field.access.is_static));
			if !is_candidate {
				return None;
			}

			let mapped = self.mappings.get_field_name(class, name)?;
			trace!("resolved field {site}.{name}:{desc} on {class} to {mapped}");
			Some(Resolved { owner: class.to_owned(), name: mapped.to_owned() })
		})
	}

	/// Resolves a method reference.
	///
	/// Returns `None` if no class in the hierarchy has a mapping for it, in which case the name is kept.
	/// Constructors and static initializers are never renamed.
	pub fn resolve_method(&self, site: &ClassNameSlice, name: &MethodNameSlice, desc: &MethodDescriptorSlice, is_static: bool)
			-> Option<Resolved<MethodName>> {
		if name.is_special() {
			return None;
		}

		self.walk(site, |class, info, is_site| {
			let is_candidate = is_site || info.and_then(|info| info.get_method(name, desc))
				.is_some_and(|method| !method.access.is_private && (is_static || !method.access.is_static));
			if !is_candidate {
				return None;
			}

			let mapped = self.mappings.get_method_name(class, name, desc)?;
			trace!("resolved method {site}.{name}{desc} on {class} to {mapped}");
			Some(Resolved { owner: class.to_owned(), name: mapped.to_owned() })
		})
	}

	/// Resolves the new name of a method declared in `class`.
	///
	/// Without an own mapping entry, a method takes the name of a method it overrides, so that overriding keeps
	/// working after renaming. Private and static methods don't override anything.
	pub fn resolve_method_declaration(&self, class: &ClassNameSlice, name: &MethodNameSlice, desc: &MethodDescriptorSlice, access: MethodAccess)
			-> Option<Resolved<MethodName>> {
		if name.is_special() {
			return None;
		}
		if let Some(mapped) = self.mappings.get_method_name(class, name, desc) {
			return Some(Resolved { owner: class.to_owned(), name: mapped.to_owned() });
		}
		if access.is_private || access.is_static {
			return None;
		}

		self.walk(class, |ancestor, info, is_site| {
			if is_site {
				return None;
			}
			let overrides = info.and_then(|info| info.get_method(name, desc))
				.is_some_and(MethodInfo::is_inheritable);
			if !overrides {
				return None;
			}

			let mapped = self.mappings.get_method_name(ancestor, name, desc)?;
			trace!("method {class}.{name}{desc} overrides {ancestor}, renamed to {mapped}");
			Some(Resolved { owner: ancestor.to_owned(), name: mapped.to_owned() })
		})
	}
}

impl<H: ClassHierarchyView + ?Sized> ARemapper for Resolver<'_, H> {
	fn map_class_fail(&self, class: &ClassNameSlice) -> Result<Option<ClassName>> {
		self.mappings.map_class_fail(class)
	}
}

impl<H: ClassHierarchyView + ?Sized> BRemapper for Resolver<'_, H> {
	fn map_field_fail(&self, owner: &ClassNameSlice, name: &FieldNameSlice, desc: &FieldDescriptorSlice, is_static: bool)
			-> Result<Option<FieldName>> {
		Ok(self.resolve_field(owner, name, desc, is_static).map(|resolved| resolved.name))
	}

	fn map_method_fail(&self, owner: &ClassNameSlice, name: &MethodNameSlice, desc: &MethodDescriptorSlice, is_static: bool)
			-> Result<Option<MethodName>> {
		Ok(self.resolve_method(owner, name, desc, is_static).map(|resolved| resolved.name))
	}
}
