pub mod code;

use anyhow::bail;
use crate::macros::{make_access_flags, make_display, make_string_str_like};
use crate::tree::class::ClassName;
use crate::tree::method::code::Code;

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
	pub access: MethodAccess,
	pub name: MethodName,
	pub descriptor: MethodDescriptor,

	pub code: Option<Code>,
	pub exceptions: Option<Vec<ClassName>>,
	pub signature: Option<MethodSignature>,

	pub method_parameters: Option<Vec<MethodParameter>>,
}

impl Method {
	pub fn new(access: MethodAccess, name: MethodName, descriptor: MethodDescriptor) -> Method {
		Method {
			access,
			name,
			descriptor,

			code: None,
			exceptions: None,
			signature: None,

			method_parameters: None,
		}
	}
}

make_access_flags!(
	pub MethodAccess {
		is_public = 0x0001 as "public",
		is_private = 0x0002 as "private",
		is_protected = 0x0004 as "protected",
		is_static = 0x0008 as "static",
		is_final = 0x0010 as "final",
		is_synchronized = 0x0020 as "synchronized",
		is_bridge = 0x0040 as "bridge",
		is_varargs = 0x0080 as "varargs",
		is_native = 0x0100 as "native",
		is_abstract = 0x0400 as "abstract",
		is_strict = 0x0800 as "strict",
		is_synthetic = 0x1000 as "synthetic",
	}
);

/// A symbolic reference to a method, as used by the `invoke*` instructions and method handles.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MethodRef {
	pub class: ClassName,
	pub name: MethodName,
	pub desc: MethodDescriptor,
}

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MethodNameAndDesc {
	pub name: MethodName,
	pub desc: MethodDescriptor,
}

make_string_str_like!(
	/// Represents a method name.
	///
	/// Apart from the special names `<init>` and `<clinit>`, method names may not contain `<` or `>`.
	pub MethodName;
	pub MethodNameSlice;
	is_valid(s) = if crate::tree::names::is_valid_method_name(s) {
		Ok(())
	} else {
		bail!("invalid method name: must be either `<init>`, `<clinit>` or be non-empty and not contain any of `.`, `;`, `[`, `/`, `<` and `>`")
	};
);
make_display!(MethodName, MethodNameSlice);

impl MethodName {
	// SAFETY: `<init>` is a valid method name.
	pub const INIT: &'static MethodNameSlice = unsafe { MethodNameSlice::from_inner_unchecked("<init>") };
	// SAFETY: `<clinit>` is a valid method name.
	pub const CLINIT: &'static MethodNameSlice = unsafe { MethodNameSlice::from_inner_unchecked("<clinit>") };
}

impl MethodNameSlice {
	/// Checks if this is one of the special names `<init>` or `<clinit>`. These are never renamed.
	pub fn is_special(&self) -> bool {
		self == MethodName::INIT || self == MethodName::CLINIT
	}
}

make_string_str_like!(
	/// Represents a method descriptor, like `(I[Ljava/lang/String;)V`.
	pub MethodDescriptor;
	pub MethodDescriptorSlice;
	is_valid(s) = crate::tree::descriptor::check_method_descriptor(s);
);
make_display!(MethodDescriptor, MethodDescriptorSlice);

make_string_str_like!(
	/// Represents a method signature, the generic type of a method, like `<T:Ljava/lang/Object;>(TT;)TT;`.
	pub MethodSignature;
	pub MethodSignatureSlice;
	is_valid(s) = crate::tree::signature::check_method_signature(s);
);
make_display!(MethodSignature, MethodSignatureSlice);

#[derive(Debug, Clone, PartialEq)]
pub struct MethodParameter {
	pub name: Option<ParameterName>,
	pub flags: ParameterFlags,
}

make_string_str_like!(
	pub ParameterName;
	pub ParameterNameSlice;
	is_valid(s) = if crate::tree::names::is_valid_unqualified_name(s) {
		Ok(())
	} else {
		bail!("invalid parameter name: must be non-empty and not contain any of `.`, `;`, `[` and `/`")
	};
);
make_display!(ParameterName, ParameterNameSlice);

make_access_flags!(
	pub ParameterFlags {
		is_final = 0x0010 as "final",
		is_synthetic = 0x1000 as "synthetic",
		is_mandated = 0x8000 as "mandated",
	}
);
