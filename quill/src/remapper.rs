//! Remappers for remapping class names, descriptors, signatures, fields and methods.
//!
//! For remapping just classes, descriptors and signatures, you're interested in [`ARemapper`].
//! If you also want to remap field names and method names, use the [`BRemapper`].
//!
//! [`Mappings`] implements both of these, looking up fields and methods only on the class given. For looking up
//! members through the inheritance hierarchy, use the [`Resolver`][crate::resolver::Resolver].
//!
//! In case you want to implement a remapper yourself, you only need to define the trait methods that don't have
//! a default implementation.
//!
//! # What is a "remapper"?
//! A remapper answers the question for you "what is the new name of X?"

use anyhow::Result;
use duke::tree::class::{ClassName, ClassNameSlice, ClassSignature, ClassSignatureSlice};
use duke::tree::field::{FieldDescriptor, FieldDescriptorSlice, FieldName, FieldNameSlice, FieldRef, FieldSignature, FieldSignatureSlice};
use duke::tree::method::{MethodDescriptor, MethodDescriptorSlice, MethodName, MethodNameSlice, MethodRef, MethodSignature, MethodSignatureSlice};
use crate::tree::mappings::Mappings;

/// A remapper supporting remapping of class names, descriptors and signatures.
pub trait ARemapper {
	/// Maps a class name to a new one, if the mapping exists.
	///
	/// If the mapping doesn't exist, returns `Ok(None)`.
	fn map_class_fail(&self, class: &ClassNameSlice) -> Result<Option<ClassName>>;

	/// Maps a class name to a new one, if the mapping doesn't exist, return the old one.
	///
	/// Do not implement this yourself.
	fn map_class(&self, class: &ClassNameSlice) -> Result<ClassName> {
		Ok(self.map_class_fail(class)?.unwrap_or_else(|| class.to_owned()))
	}

	/// Maps any class name, including array class names like `[Lfoo;`.
	///
	/// Do not implement this yourself.
	fn map_class_any(&self, class: &ClassNameSlice) -> Result<ClassName> {
		if class.is_array() {
			let mapped = duke::tree::descriptor::remap_descriptor(class.as_str(), &mut |name| self.map_class_fail(name))?;
			// SAFETY: Remapping an array class name (which is a field descriptor) only changes the names in `L...;`,
			// so it stays a valid array class name.
			Ok(unsafe { ClassName::from_inner_unchecked(mapped) })
		} else {
			self.map_class(class)
		}
	}

	/// Maps a field descriptor to a new one.
	///
	/// Do not implement this yourself.
	fn map_field_desc(&self, desc: &FieldDescriptorSlice) -> Result<FieldDescriptor> {
		desc.remap(&mut |name| self.map_class_fail(name))
	}

	/// Maps a method descriptor to a new one.
	///
	/// Do not implement this yourself.
	fn map_method_desc(&self, desc: &MethodDescriptorSlice) -> Result<MethodDescriptor> {
		desc.remap(&mut |name| self.map_class_fail(name))
	}

	/// Do not implement this yourself.
	fn map_class_sig(&self, sig: &ClassSignatureSlice) -> Result<ClassSignature> {
		sig.remap(&mut |name| self.map_class_fail(name))
	}

	/// Do not implement this yourself.
	fn map_field_sig(&self, sig: &FieldSignatureSlice) -> Result<FieldSignature> {
		sig.remap(&mut |name| self.map_class_fail(name))
	}

	/// Do not implement this yourself.
	fn map_method_sig(&self, sig: &MethodSignatureSlice) -> Result<MethodSignature> {
		sig.remap(&mut |name| self.map_class_fail(name))
	}
}

impl ARemapper for Mappings {
	fn map_class_fail(&self, class: &ClassNameSlice) -> Result<Option<ClassName>> {
		Ok(self.get_class_name_fail(class).map(ToOwned::to_owned))
	}
}

/// A remapper supporting remapping fields and methods, as well as class names and descriptors.
///
/// The `is_static` arguments tell whether the member is accessed in a static way, like with `getstatic` or
/// `invokestatic`.
pub trait BRemapper: ARemapper {
	/// Maps a field name to a new one, if the mapping exists.
	///
	/// `owner` is the class the field is referenced on.
	fn map_field_fail(&self, owner: &ClassNameSlice, name: &FieldNameSlice, desc: &FieldDescriptorSlice, is_static: bool)
		-> Result<Option<FieldName>>;

	/// Maps a method name to a new one, if the mapping exists.
	///
	/// `owner` is the class the method is referenced on.
	fn map_method_fail(&self, owner: &ClassNameSlice, name: &MethodNameSlice, desc: &MethodDescriptorSlice, is_static: bool)
		-> Result<Option<MethodName>>;

	/// Maps a [`FieldRef`], taking care of the class name and the descriptor as well.
	///
	/// Do not implement this yourself.
	fn map_field_ref(&self, field_ref: &FieldRef, is_static: bool) -> Result<FieldRef> {
		let name = self.map_field_fail(&field_ref.class, &field_ref.name, &field_ref.desc, is_static)?
			.unwrap_or_else(|| field_ref.name.clone());
		Ok(FieldRef {
			class: self.map_class_any(&field_ref.class)?,
			name,
			desc: self.map_field_desc(&field_ref.desc)?,
		})
	}

	/// Maps a [`MethodRef`], taking care of the class name and the descriptor as well.
	///
	/// Methods called on array classes, like `[I.clone()`, keep their name.
	///
	/// Do not implement this yourself.
	fn map_method_ref(&self, method_ref: &MethodRef, is_static: bool) -> Result<MethodRef> {
		let name = if method_ref.class.is_array() {
			None
		} else {
			self.map_method_fail(&method_ref.class, &method_ref.name, &method_ref.desc, is_static)?
		};
		Ok(MethodRef {
			class: self.map_class_any(&method_ref.class)?,
			name: name.unwrap_or_else(|| method_ref.name.clone()),
			desc: self.map_method_desc(&method_ref.desc)?,
		})
	}
}

impl BRemapper for Mappings {
	fn map_field_fail(&self, owner: &ClassNameSlice, name: &FieldNameSlice, _desc: &FieldDescriptorSlice, _is_static: bool)
			-> Result<Option<FieldName>> {
		Ok(self.get_field_name(owner, name).map(ToOwned::to_owned))
	}

	fn map_method_fail(&self, owner: &ClassNameSlice, name: &MethodNameSlice, desc: &MethodDescriptorSlice, _is_static: bool)
			-> Result<Option<MethodName>> {
		Ok(self.get_method_name(owner, name, desc).map(ToOwned::to_owned))
	}
}
