use anyhow::Result;
use pretty_assertions::assert_eq;
use duke::tree::class::{ClassName, ClassNameSlice};
use duke::tree::field::FieldName;
use duke::tree::method::{MethodName, MethodNameSlice};

#[test]
fn valid_class_names() {
	for i in ["foo", "foo$bar", "java/lang/Object", "org/example/MyClassName", "[[[D", "[[Ljava/lang/Integer;"] {
		assert!(ClassName::is_valid(i), "{i:?} is a valid class name");
	}
}

#[test]
fn invalid_class_names() {
	for i in ["", "/", "a/", "/a", "a//b", "a.b", "a;b", "[", "[V", "[Ljava/lang/Integer"] {
		assert!(!ClassName::is_valid(i), "{i:?} is an invalid class name");
	}
}

#[test]
fn field_and_method_names() {
	assert!(FieldName::is_valid("field_1234"));
	assert!(!FieldName::is_valid("a/b"));
	assert!(MethodName::is_valid("<init>"));
	assert!(MethodName::is_valid("method_1"));
	assert!(!MethodName::is_valid("<notinit>"));
}

#[test]
fn special_method_names() -> Result<()> {
	assert!(MethodName::INIT.is_special());
	assert!(MethodName::CLINIT.is_special());
	assert!(!<&MethodNameSlice>::try_from("run")?.is_special());
	Ok(())
}

#[test]
fn owned_and_borrowed() -> Result<()> {
	let owned = ClassName::try_from("org/example/Foo")?;
	let borrowed: &ClassNameSlice = &owned;
	assert_eq!(owned, borrowed);
	assert_eq!(borrowed.to_owned(), owned);
	assert_eq!(owned.to_string(), "org/example/Foo");
	assert_eq!(String::from(owned), "org/example/Foo");
	Ok(())
}
