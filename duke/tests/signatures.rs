use anyhow::Result;
use pretty_assertions::assert_eq;
use duke::error::GrammarError;
use duke::tree::class::{ClassName, ClassNameSlice, ClassSignatureSlice};
use duke::tree::signature::{remap_class_signature, remap_field_signature, remap_method_signature};

fn table<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl FnMut(&ClassNameSlice) -> Result<Option<ClassName>> + 'a {
	move |name| {
		pairs.iter()
			.find(|(from, _)| name == *from)
			.map(|(_, to)| ClassName::try_from(*to))
			.transpose()
	}
}

#[test]
fn type_variables_are_kept() -> Result<()> {
	// a class named `T` must not change the type variable `T`
	let mut f = table(&[("T", "renamed/T"), ("a", "b")]);
	assert_eq!(remap_field_signature("TT;", &mut f)?, "TT;");
	assert_eq!(remap_field_signature("LT;", &mut f)?, "Lrenamed/T;");
	assert_eq!(remap_method_signature("<T:La;>(TT;)TT;", &mut f)?, "<T:Lb;>(TT;)TT;");
	Ok(())
}

#[test]
fn nested_type_arguments() -> Result<()> {
	let mut f = table(&[("a/A", "x/X"), ("a/B", "x/Y")]);
	assert_eq!(
		remap_field_signature("Ljava/util/Map<La/A;Ljava/util/List<+La/B;>;>;", &mut f)?,
		"Ljava/util/Map<Lx/X;Ljava/util/List<+Lx/Y;>;>;"
	);
	assert_eq!(
		remap_field_signature("La/A<*[La/B;-TT;>;", &mut f)?,
		"Lx/X<*[Lx/Y;-TT;>;"
	);
	Ok(())
}

#[test]
fn class_signature() -> Result<()> {
	let mut f = table(&[("a/Base", "n/Base"), ("a/Api", "n/Api"), ("a/Key", "n/Key")]);
	assert_eq!(
		remap_class_signature("<K:La/Key;V::La/Api;>La/Base<TK;>;La/Api;Ljava/lang/Runnable;", &mut f)?,
		"<K:Ln/Key;V::Ln/Api;>Ln/Base<TK;>;Ln/Api;Ljava/lang/Runnable;"
	);

	let sig = <&ClassSignatureSlice>::try_from("La/Base<La/Key;>;")?;
	assert_eq!(sig.remap(&mut f)?, "Ln/Base<Ln/Key;>;");
	Ok(())
}

#[test]
fn throws_clause() -> Result<()> {
	let mut f = table(&[("a/Ex", "n/Failure")]);
	assert_eq!(
		remap_method_signature("<E:La/Ex;>()V^TE;^La/Ex;", &mut f)?,
		"<E:Ln/Failure;>()V^TE;^Ln/Failure;"
	);
	Ok(())
}

#[test]
fn inner_classes() -> Result<()> {
	// renamed outer and inner, inner keeps the outer prefix
	let mut f = table(&[("a/Outer", "n/Host"), ("a/Outer$Inner", "n/Host$Guest")]);
	assert_eq!(
		remap_field_signature("La/Outer<TT;>.Inner<TU;>;", &mut f)?,
		"Ln/Host<TT;>.Guest<TU;>;"
	);

	// the inner class moved elsewhere, use the part after the last `$`
	let mut f = table(&[("a/Outer", "n/Host"), ("a/Outer$Inner", "m/Elsewhere$Moved")]);
	assert_eq!(remap_field_signature("La/Outer<TT;>.Inner;", &mut f)?, "Ln/Host<TT;>.Moved;");

	// only the outer class is renamed
	let mut f = table(&[("a/Outer", "n/Host")]);
	assert_eq!(remap_field_signature("La/Outer<TT;>.Inner.Deep;", &mut f)?, "Ln/Host<TT;>.Inner.Deep;");

	// the lookup of a deeper class uses the unmapped names
	let mut f = table(&[("a/Outer", "n/Host"), ("a/Outer$Inner$Deep", "n/Host$Inner$Bottom")]);
	assert_eq!(remap_field_signature("La/Outer<TT;>.Inner.Deep;", &mut f)?, "Ln/Host<TT;>.Inner.Bottom;");
	Ok(())
}

#[test]
fn unmapped_stays_identical() -> Result<()> {
	let signatures = [
		"<T:Ljava/lang/Object;>(TT;[Ljava/util/List<*>;)Ljava/util/Map$Entry<TT;-TT;>;^Ljava/io/IOException;",
		"(I)V",
	];
	for s in signatures {
		assert_eq!(remap_method_signature(s, &mut |_| Ok(None))?, s);
	}
	Ok(())
}

#[test]
fn malformed_carries_text() {
	let e = remap_field_signature("Ljava/util/List<TT;", &mut |_| Ok(None)).unwrap_err();
	let grammar_error = e.downcast_ref::<GrammarError>();
	assert!(matches!(grammar_error, Some(GrammarError::InvalidSignature { .. })));
	assert_eq!(grammar_error.map(GrammarError::offending_text), Some("Ljava/util/List<TT;"));
}

#[test]
fn deep_nesting_is_an_error() -> Result<()> {
	let nested = |n: usize| "La<".repeat(n) + "La;" + &">;".repeat(n);

	let mut f = table(&[("a", "b")]);
	assert_eq!(remap_field_signature(&nested(255), &mut f)?, "Lb<".repeat(255) + "Lb;" + &">;".repeat(255));

	let text = nested(12000);
	let e = remap_field_signature(&text, &mut f).unwrap_err();
	let grammar_error = e.downcast_ref::<GrammarError>();
	assert!(matches!(grammar_error, Some(GrammarError::InvalidSignature { .. })));
	assert_eq!(grammar_error.map(GrammarError::offending_text), Some(text.as_str()));

	let arrays = "[".repeat(255) + "La;";
	assert_eq!(remap_field_signature(&arrays, &mut f)?, "[".repeat(255) + "Lb;");
	assert!(remap_field_signature(&("[".repeat(300) + "La;"), &mut f).is_err());
	Ok(())
}
