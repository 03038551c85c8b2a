use anyhow::bail;
use crate::macros::{make_access_flags, make_display, make_string_str_like};
use crate::tree::field::Field;
use crate::tree::method::{Method, MethodNameAndDesc};

/// The version of a class file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
	pub major: u16,
	pub minor: u16,
}

impl Version {
	pub const V1_8: Version = Version { major: 52, minor: 0 };
	pub const V17: Version = Version { major: 61, minor: 0 };
}

/// A class file, as read by a class file codec.
///
/// Only the parts that can hold symbolic references are stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
	pub version: Version,
	pub access: ClassAccess,
	pub name: ClassName,
	pub super_class: Option<ClassName>,
	pub interfaces: Vec<ClassName>,

	pub fields: Vec<Field>,
	pub methods: Vec<Method>,

	pub inner_classes: Option<Vec<InnerClass>>,
	pub enclosing_method: Option<EnclosingMethod>,
	pub signature: Option<ClassSignature>,

	pub source_file: Option<String>,

	pub nest_host_class: Option<ClassName>,
	pub nest_members: Option<Vec<ClassName>>,
	pub permitted_subclasses: Option<Vec<ClassName>>,
}

impl ClassFile {
	pub fn new(version: Version, access: ClassAccess, name: ClassName, super_class: Option<ClassName>, interfaces: Vec<ClassName>) -> ClassFile {
		ClassFile {
			version,
			access,
			name,
			super_class,
			interfaces,

			fields: Vec::new(),
			methods: Vec::new(),

			inner_classes: None,
			enclosing_method: None,
			signature: None,

			source_file: None,

			nest_host_class: None,
			nest_members: None,
			permitted_subclasses: None,
		}
	}
}

make_access_flags!(
	/// Represents the access flags a class can have.
	///
	/// Take a look at the [Java Virtual Machine Specification](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.1-200-E.1), for
	/// the meanings of these fields, and what combinations are legal and which not.
	pub ClassAccess {
		is_public = 0x0001 as "public",
		is_final = 0x0010 as "final",
		is_super = 0x0020 as "super",
		is_interface = 0x0200 as "interface",
		is_abstract = 0x0400 as "abstract",
		is_synthetic = 0x1000 as "synthetic",
		is_annotation = 0x2000 as "annotation",
		is_enum = 0x4000 as "enum",
		is_module = 0x8000 as "module",
	}
);

make_string_str_like!(
	/// Represents a class name.
	///
	/// Class names use the [internal binary names](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.2.1),
	/// i.e. with the complete path written out and using slashes, like `java/lang/Thread`.
	///
	/// Array classes (as they appear in `checkcast` or `anewarray` for example) are also valid class names, these are
	/// written as a field descriptor, like `[Ljava/lang/Object;` or `[[I`.
	pub ClassName;
	/// A [`ClassName`] slice.
	pub ClassNameSlice;
	is_valid(s) = if crate::tree::names::is_valid_class_name(s) {
		Ok(())
	} else {
		bail!("invalid class name: must be either array field descriptor; or must consist out of `/` separated non-empty parts, and not contain any of `.`, `;`, `[`")
	};
);
make_display!(ClassName, ClassNameSlice);

impl ClassName {
	/// A constant holding the class name of `Object`.
	// SAFETY: `java/lang/Object` is a valid class name.
	pub const JAVA_LANG_OBJECT: &'static ClassNameSlice = unsafe { ClassNameSlice::from_inner_unchecked("java/lang/Object") };

	/// Creates a class name for joining together an inner class parent name and an inner class name.
	///
	/// ```
	/// # use pretty_assertions::assert_eq;
	/// use duke::tree::class::{ClassName, ClassNameSlice};
	///
	/// let parent = ClassName::try_from("org/example/OuterClass").unwrap();
	/// let inner = <&ClassNameSlice>::try_from("InnerClass").unwrap();
	///
	/// assert_eq!(ClassName::from_inner_class(&parent, inner), "org/example/OuterClass$InnerClass");
	/// ```
	pub fn from_inner_class(parent: &ClassNameSlice, inner_name: &ClassNameSlice) -> ClassName {
		let s = format!("{}${}", parent.as_str(), inner_name.as_str());
		// SAFETY: Joining two object class names with `$` together always creates a valid object class name.
		unsafe { ClassName::from_inner_unchecked(s) }
	}
}

impl ClassNameSlice {
	/// Checks if this is an array class.
	///
	/// Array class names start with `[`.
	pub fn is_array(&self) -> bool {
		self.as_str().starts_with('[')
	}

	/// Gets the simple name from a class name, that is the part after the last `/`.
	pub fn get_simple_name(&self) -> &ClassNameSlice {
		self.as_str().rsplit_once('/')
			// SAFETY: Each component in a object class name is itself a valid object class name.
			.map_or(self, |(_, simple)| unsafe { ClassNameSlice::from_inner_unchecked(simple) })
	}

	/// Gets the innermost name of a class name: the part after the last `$` of the simple name.
	///
	/// If the simple name has no `$` in it (or only at the very start or end), the simple name is returned.
	///
	/// ```
	/// # use pretty_assertions::assert_eq;
	/// use duke::tree::class::ClassNameSlice;
	///
	/// let name = <&ClassNameSlice>::try_from("org/example/Outer$Inner").unwrap();
	/// assert_eq!(name.get_innermost_name(), "Inner");
	///
	/// let name = <&ClassNameSlice>::try_from("org/example/Plain").unwrap();
	/// assert_eq!(name.get_innermost_name(), "Plain");
	/// ```
	pub fn get_innermost_name(&self) -> &str {
		let simple = self.get_simple_name().as_str();
		match simple.rsplit_once('$') {
			Some((outer, inner)) if !outer.is_empty() && !inner.is_empty() => inner,
			_ => simple,
		}
	}
}

make_string_str_like!(
	/// Represents a class signature, from a generic such as `Foo<T extends Bar> extends Baz<T>`.
	///
	/// The grammar is the `ClassSignature` one from
	/// [section 4.7.9.1](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.7.9.1).
	pub ClassSignature;
	pub ClassSignatureSlice;
	is_valid(s) = crate::tree::signature::check_class_signature(s);
);
make_display!(ClassSignature, ClassSignatureSlice);

#[derive(Debug, Clone, PartialEq)]
pub struct InnerClass {
	pub inner_class: ClassName,
	pub outer_class: Option<ClassName>,
	/// The simple name of the inner class as written in the source. This is `None` for anonymous classes.
	pub inner_name: Option<String>,
	pub flags: InnerClassFlags,
}

make_access_flags!(
	pub InnerClassFlags {
		is_public = 0x0001 as "public",
		is_private = 0x0002 as "private",
		is_protected = 0x0004 as "protected",
		is_static = 0x0008 as "static",
		is_final = 0x0010 as "final",
		is_interface = 0x0200 as "interface",
		is_abstract = 0x0400 as "abstract",
		is_synthetic = 0x1000 as "synthetic",
		is_annotation = 0x2000 as "annotation",
		is_enum = 0x4000 as "enum",
	}
);

#[derive(Debug, Clone, PartialEq)]
pub struct EnclosingMethod {
	pub class: ClassName,
	pub method: Option<MethodNameAndDesc>,
}
