use anyhow::bail;
use crate::macros::{make_access_flags, make_display, make_string_str_like};
use crate::tree::class::ClassName;

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
	pub access: FieldAccess,
	pub name: FieldName,
	pub descriptor: FieldDescriptor,

	pub signature: Option<FieldSignature>,
}

impl Field {
	pub fn new(access: FieldAccess, name: FieldName, descriptor: FieldDescriptor) -> Field {
		Field { access, name, descriptor, signature: None }
	}
}

make_access_flags!(
	pub FieldAccess {
		is_public = 0x0001 as "public",
		is_private = 0x0002 as "private",
		is_protected = 0x0004 as "protected",
		is_static = 0x0008 as "static",
		is_final = 0x0010 as "final",
		is_volatile = 0x0040 as "volatile",
		is_transient = 0x0080 as "transient",
		is_synthetic = 0x1000 as "synthetic",
		is_enum = 0x4000 as "enum",
	}
);

/// A symbolic reference to a field, as used by `getfield` and friends.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldRef {
	pub class: ClassName,
	pub name: FieldName,
	pub desc: FieldDescriptor,
}

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldNameAndDesc {
	pub name: FieldName,
	pub desc: FieldDescriptor,
}

make_string_str_like!(
	/// Represents a field name.
	///
	/// Field names are [unqualified names](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.2.2).
	pub FieldName;
	pub FieldNameSlice;
	is_valid(s) = if crate::tree::names::is_valid_unqualified_name(s) {
		Ok(())
	} else {
		bail!("invalid field name: must be non-empty and not contain any of `.`, `;`, `[` and `/`")
	};
);
make_display!(FieldName, FieldNameSlice);

make_string_str_like!(
	/// Represents a field descriptor, like `I`, `[J` or `Ljava/lang/String;`.
	pub FieldDescriptor;
	pub FieldDescriptorSlice;
	is_valid(s) = crate::tree::descriptor::check_field_descriptor(s);
);
make_display!(FieldDescriptor, FieldDescriptorSlice);

make_string_str_like!(
	/// Represents a field signature, the generic type of a field, like `Ljava/util/List<TT;>;`.
	pub FieldSignature;
	pub FieldSignatureSlice;
	is_valid(s) = crate::tree::signature::check_field_signature(s);
);
make_display!(FieldSignature, FieldSignatureSlice);
