pub mod class;
pub mod field;
pub mod method;
pub mod descriptor;
pub mod signature;

mod cursor;

mod names {
	/// Checks if a class name is valid according to JVMS 4.2.1 (also accepting array class names).
	pub(super) fn is_valid_class_name(x: &str) -> bool {
		if x.starts_with('[') {
			is_valid_arr_class_name(x)
		} else {
			is_valid_obj_class_name(x)
		}
	}

	/// Checks if a class name is a valid array class name, i.e. a field descriptor of an array type.
	pub(super) fn is_valid_arr_class_name(x: &str) -> bool {
		x.starts_with('[') && crate::tree::descriptor::check_field_descriptor(x).is_ok()
	}

	/// Checks if a class name is a valid object class name, that is a list of `/` separated unqualified names.
	pub(super) fn is_valid_obj_class_name(x: &str) -> bool {
		x.split('/').all(is_valid_unqualified_name)
	}

	/// Checks if a name is an unqualified name according to JVMS 4.2.2
	///
	/// This is used for field names, formal parameter names, local variable names.
	pub(super) fn is_valid_unqualified_name(x: &str) -> bool {
		// must contain at least one unicode codepoint
		!x.is_empty() &&
			// must not contain any of . ; [ /
			x.chars().all(|c| !matches!(c, '.' | ';' | '[' | '/'))
	}

	/// Checks if a method name is valid according to JVMS 4.2.2
	pub(super) fn is_valid_method_name(x: &str) -> bool {
		// either one of the special names or an unqualified name with special < > restriction
		x == "<init>" || x == "<clinit>" || (
			!x.is_empty() &&
				x.chars().all(|c| !matches!(c, '.' | ';' | '[' | '/' | '<' | '>'))
		)
	}

	#[cfg(test)]
	mod testing {
		use crate::tree::names::*;

		#[test]
		fn class_names() {
			assert!(is_valid_class_name("java/lang/Object"));
			assert!(is_valid_class_name("java/lang/Thread"));
			assert!(is_valid_class_name("[[[D"));
			assert!(is_valid_class_name("[Ljava/lang/Object;"));
			assert!(is_valid_class_name("An$Inner$Class"));

			assert!(!is_valid_class_name("")); // an empty class name is not valid
			assert!(!is_valid_class_name("/"));
			assert!(!is_valid_class_name("/a"));
			assert!(!is_valid_class_name("a/"));
			assert!(!is_valid_class_name("a//b"));
			assert!(!is_valid_class_name("a.b"));
			assert!(!is_valid_class_name("a;b"));
			assert!(!is_valid_class_name("a[b"));
			assert!(!is_valid_class_name("[V"));
			assert!(!is_valid_class_name("[Ljava/lang/Object"));
		}

		#[test]
		fn unqualified_names() {
			assert!(is_valid_unqualified_name("foo"));
			assert!(is_valid_unqualified_name("1234567")); // numbers are valid here, but not in java source code
			assert!(is_valid_unqualified_name("a$name"));

			assert!(!is_valid_unqualified_name(""));
			assert!(!is_valid_unqualified_name("."));
			assert!(!is_valid_unqualified_name(";"));
			assert!(!is_valid_unqualified_name("["));
			assert!(!is_valid_unqualified_name("/"));
		}

		#[test]
		fn method_names() {
			assert!(is_valid_method_name("foo"));
			assert!(is_valid_method_name("<init>"));
			assert!(is_valid_method_name("<clinit>"));
			assert!(is_valid_method_name("---"));

			assert!(!is_valid_method_name(""));
			assert!(!is_valid_method_name("/"));
			assert!(!is_valid_method_name("<NotClinit>"));
			assert!(!is_valid_method_name("<>"));
			assert!(!is_valid_method_name(">"));
		}
	}
}
