use anyhow::Result;
use pretty_assertions::assert_eq;
use duke::error::GrammarError;
use duke::tree::class::{ClassName, ClassNameSlice};
use duke::tree::descriptor::remap_descriptor;
use duke::tree::field::FieldDescriptor;
use duke::tree::method::{MethodDescriptor, MethodDescriptorSlice};

fn table<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl FnMut(&ClassNameSlice) -> Result<Option<ClassName>> + 'a {
	move |name| {
		pairs.iter()
			.find(|(from, _)| name == *from)
			.map(|(_, to)| ClassName::try_from(*to))
			.transpose()
	}
}

#[test]
fn valid_field_descriptors() {
	for i in ["B", "C", "D", "F", "I", "J", "S", "Z", "Ljava/lang/Object;", "Lorg/example/MyClassName;", "[[[D"] {
		assert!(FieldDescriptor::is_valid(i), "{i:?} is a valid field desc");
	}
}

#[test]
fn invalid_field_descriptors() {
	for i in ["", "V", "(", ")", "()", "[V", "L;", "()V", "foo", "(D)I", "L;DV"] {
		assert!(!FieldDescriptor::is_valid(i), "{i:?} is an invalid field desc");
	}
}

#[test]
fn valid_method_descriptors() {
	for i in ["()V", "(I)V", "(IDJ)Ljava/lang/Object;", "([[Lorg/example/Foo;)[I", "(Lfoo;Lbar;)Z"] {
		assert!(MethodDescriptor::is_valid(i), "{i:?} is a valid method desc");
	}
}

#[test]
fn invalid_method_descriptors() {
	for i in ["", "V", "I", "(", "()", "(V)V", "(I)VV", "Lfoo;", "(L;)V", "()[V"] {
		assert!(!MethodDescriptor::is_valid(i), "{i:?} is an invalid method desc");
	}
}

#[test]
fn remap_method_descriptor() -> Result<()> {
	let mut f = table(&[("a/b/C", "com/example/Foo")]);
	assert_eq!(remap_descriptor("(La/b/C;I)La/b/C;", &mut f)?, "(Lcom/example/Foo;I)Lcom/example/Foo;");
	assert_eq!(remap_descriptor("()V", &mut f)?, "()V");
	assert_eq!(remap_descriptor("([[La/b/C;J)[La/b/D;", &mut f)?, "([[Lcom/example/Foo;J)[La/b/D;");
	Ok(())
}

#[test]
fn remap_field_descriptor() -> Result<()> {
	let mut f = table(&[("a", "b"), ("b", "c")]);
	assert_eq!(remap_descriptor("La;", &mut f)?, "Lb;");
	assert_eq!(remap_descriptor("[[[La;", &mut f)?, "[[[Lb;");
	assert_eq!(remap_descriptor("I", &mut f)?, "I");
	Ok(())
}

#[test]
fn round_trip_through_inverse() -> Result<()> {
	let forward = [("a", "net/Alpha"), ("b/B", "net/Beta"), ("c", "c2")];
	let inverse: Vec<_> = forward.iter().map(|&(a, b)| (b, a)).collect();

	let descriptors = [
		"(La;Lb/B;[Lc;)V",
		"([[Ljava/lang/Object;IJLb/B;)La;",
		"Lc;",
		"[[Lb/B;",
	];
	for d in descriptors {
		let there = remap_descriptor(d, &mut table(&forward))?;
		let back = remap_descriptor(&there, &mut table(&inverse))?;
		assert_eq!(back, d);
	}
	Ok(())
}

#[test]
fn typed_remap() -> Result<()> {
	let desc = <&MethodDescriptorSlice>::try_from("(La;)La;")?;
	let remapped = desc.remap(&mut table(&[("a", "x/Y")]))?;
	assert_eq!(remapped, "(Lx/Y;)Lx/Y;");
	Ok(())
}

#[test]
fn malformed_carries_text() {
	let e = remap_descriptor("(La/b/C", &mut |_| Ok(None)).unwrap_err();
	let grammar_error = e.downcast_ref::<GrammarError>();
	assert!(matches!(grammar_error, Some(GrammarError::InvalidDescriptor { .. })));
	assert_eq!(grammar_error.map(GrammarError::offending_text), Some("(La/b/C"));
}
