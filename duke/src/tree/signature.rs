//! Parsing and rewriting of generic signatures.
//!
//! The grammar is the one from [section 4.7.9.1](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.7.9.1).
//! Rewriting keeps everything but the class names as is: type variables (`TT;`), wildcards (`*`, `+`, `-`),
//! bounds and throws clauses are copied over.
//!
//! Inner classes in a class type signature are written as `Lpkg/Outer<TT;>.Inner;`. The class that gets looked up
//! for `Inner` is `pkg/Outer$Inner`. If it's renamed, only the part after the renamed outer class and `$` is written,
//! or the part after the last `$` if the new name doesn't start with the renamed outer class.
use anyhow::Result;
use crate::error::GrammarError;
use crate::tree::class::{ClassName, ClassNameSlice, ClassSignature, ClassSignatureSlice};
use crate::tree::cursor::Cursor;
use crate::tree::field::{FieldSignature, FieldSignatureSlice};
use crate::tree::method::{MethodSignature, MethodSignatureSlice};

/// How deep reference types may be nested in each other, through type arguments or array types.
const MAX_NESTING: usize = 256;

fn is_valid_identifier(x: &str) -> bool {
	!x.is_empty() && !x.contains(['.', ';', '[', '/', '<', '>', ':'])
}

struct SignatureRemapper<'a, 'f, F> {
	cursor: Cursor<'a>,
	out: String,
	f: &'f mut F,
	depth: usize,
}

impl<'a, 'f, F> SignatureRemapper<'a, 'f, F>
where
	F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
{
	fn new(text: &'a str, f: &'f mut F) -> Self {
		SignatureRemapper {
			cursor: Cursor::new(text),
			out: String::with_capacity(text.len()),
			f,
			depth: 0,
		}
	}

	fn error(&self, reason: impl Into<String>) -> anyhow::Error {
		GrammarError::signature(self.cursor.text(), reason).into()
	}

	fn expect(&mut self, c: char) -> Result<()> {
		if self.cursor.eat(c) {
			self.out.push(c);
			Ok(())
		} else {
			match self.cursor.peek() {
				Some(x) => Err(self.error(format!("expected {c:?} at {}, got {x:?}", self.cursor.pos()))),
				None => Err(self.error(format!("expected {c:?} at {}, got end", self.cursor.pos()))),
			}
		}
	}

	fn finish(self) -> Result<String> {
		if self.cursor.is_at_end() {
			Ok(self.out)
		} else {
			Err(self.error(format!("expected end, got {:?} remaining", self.cursor.rest())))
		}
	}

	fn identifier(&mut self, stop: &[char]) -> Result<&'a str> {
		let identifier = self.cursor.take_until(stop);
		if is_valid_identifier(identifier) {
			Ok(identifier)
		} else {
			Err(self.error(format!("invalid identifier {identifier:?}")))
		}
	}

	// JavaTypeSignature: ReferenceTypeSignature | BaseType
	fn java_type_signature(&mut self) -> Result<()> {
		match self.cursor.peek() {
			Some(c @ ('B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z')) => {
				self.cursor.bump();
				self.out.push(c);
				Ok(())
			},
			_ => self.reference_type_signature(),
		}
	}

	// ReferenceTypeSignature: ClassTypeSignature | TypeVariableSignature | ArrayTypeSignature
	fn reference_type_signature(&mut self) -> Result<()> {
		if self.depth == MAX_NESTING {
			return Err(self.error(format!("nesting too deep at {}, more than {MAX_NESTING} levels", self.cursor.pos())));
		}
		self.depth += 1;
		let result = self.nested_reference_type_signature();
		self.depth -= 1;
		result
	}

	fn nested_reference_type_signature(&mut self) -> Result<()> {
		match self.cursor.peek() {
			Some('L') => self.class_type_signature(),
			Some('T') => self.type_variable_signature(),
			Some('[') => {
				self.expect('[')?;
				self.java_type_signature()
			},
			Some(x) => Err(self.error(format!("unexpected char {x:?} at {}", self.cursor.pos()))),
			None => Err(self.error("unexpected abrupt ending")),
		}
	}

	// TypeVariableSignature: "T" Identifier ";"
	fn type_variable_signature(&mut self) -> Result<()> {
		self.expect('T')?;
		let identifier = self.identifier(&[';'])?;
		self.out.push_str(identifier);
		self.expect(';')
	}

	// ClassTypeSignature: "L" [PackageSpecifier] SimpleClassTypeSignature {"." SimpleClassTypeSignature} ";"
	fn class_type_signature(&mut self) -> Result<()> {
		self.expect('L')?;

		let name = self.cursor.take_until(&['<', '.', ';']);
		if !crate::tree::names::is_valid_obj_class_name(name) || name.contains([':', '>']) {
			return Err(self.error(format!("invalid class name {name:?}")));
		}
		// SAFETY: We just checked that it's a valid object class name.
		let mut raw_outer = unsafe { ClassName::from_inner_unchecked(name.to_owned()) };
		let mut mapped_outer = (self.f)(&raw_outer)?.unwrap_or_else(|| raw_outer.clone());
		self.out.push_str(mapped_outer.as_str());

		self.type_arguments()?;

		while self.cursor.eat('.') {
			self.out.push('.');

			let inner = self.identifier(&['<', '.', ';'])?;
			// SAFETY: An identifier is a valid object class name.
			let inner = unsafe { ClassNameSlice::from_inner_unchecked(inner) };

			let raw_inner = ClassName::from_inner_class(&raw_outer, inner);
			match (self.f)(&raw_inner)? {
				Some(mapped_inner) => {
					let simple = mapped_inner.as_str()
						.strip_prefix(mapped_outer.as_str())
						.and_then(|rest| rest.strip_prefix('$'))
						.filter(|rest| is_valid_identifier(rest))
						.unwrap_or_else(|| mapped_inner.get_innermost_name());
					self.out.push_str(simple);
					mapped_outer = mapped_inner;
				},
				None => {
					self.out.push_str(inner.as_str());
					mapped_outer = ClassName::from_inner_class(&mapped_outer, inner);
				},
			}
			raw_outer = raw_inner;

			self.type_arguments()?;
		}

		self.expect(';')
	}

	// TypeArguments: "<" TypeArgument {TypeArgument} ">"
	// TypeArgument: [WildcardIndicator] ReferenceTypeSignature | "*"
	fn type_arguments(&mut self) -> Result<()> {
		if !self.cursor.eat('<') {
			return Ok(());
		}
		self.out.push('<');

		if self.cursor.peek() == Some('>') {
			return Err(self.error("empty type arguments"));
		}
		while !self.cursor.eat('>') {
			match self.cursor.peek() {
				Some('*') => self.expect('*')?,
				Some(c @ ('+' | '-')) => {
					self.expect(c)?;
					self.reference_type_signature()?;
				},
				_ => self.reference_type_signature()?,
			}
		}
		self.out.push('>');
		Ok(())
	}

	// TypeParameters: "<" TypeParameter {TypeParameter} ">"
	// TypeParameter: Identifier ":" [ReferenceTypeSignature] {":" ReferenceTypeSignature}
	fn type_parameters(&mut self) -> Result<()> {
		if !self.cursor.eat('<') {
			return Ok(());
		}
		self.out.push('<');

		if self.cursor.peek() == Some('>') {
			return Err(self.error("empty type parameters"));
		}
		while !self.cursor.eat('>') {
			let identifier = self.identifier(&[':'])?;
			self.out.push_str(identifier);

			self.expect(':')?;
			if matches!(self.cursor.peek(), Some('L' | 'T' | '[')) {
				self.reference_type_signature()?;
			}
			while self.cursor.eat(':') {
				self.out.push(':');
				self.reference_type_signature()?;
			}
		}
		self.out.push('>');
		Ok(())
	}

	// ClassSignature: [TypeParameters] SuperclassSignature {SuperinterfaceSignature}
	fn class_signature(mut self) -> Result<String> {
		self.type_parameters()?;
		self.class_type_signature()?;
		while !self.cursor.is_at_end() {
			self.class_type_signature()?;
		}
		self.finish()
	}

	// MethodSignature: [TypeParameters] "(" {JavaTypeSignature} ")" Result {ThrowsSignature}
	fn method_signature(mut self) -> Result<String> {
		self.type_parameters()?;

		self.expect('(')?;
		while !self.cursor.eat(')') {
			if self.cursor.is_at_end() {
				return Err(self.error("parameter list not terminated by `)`"));
			}
			self.java_type_signature()?;
		}
		self.out.push(')');

		if self.cursor.eat('V') {
			self.out.push('V');
		} else {
			self.java_type_signature()?;
		}

		while self.cursor.eat('^') {
			self.out.push('^');
			match self.cursor.peek() {
				Some('T') => self.type_variable_signature()?,
				_ => self.class_type_signature()?,
			}
		}
		self.finish()
	}

	// FieldSignature: ReferenceTypeSignature
	fn field_signature(mut self) -> Result<String> {
		self.reference_type_signature()?;
		self.finish()
	}
}

fn keep(_: &ClassNameSlice) -> Result<Option<ClassName>> {
	Ok(None)
}

/// Checks that `text` is a valid class signature.
///
/// The error carries a [`GrammarError::InvalidSignature`].
pub fn check_class_signature(text: &str) -> Result<()> {
	SignatureRemapper::new(text, &mut keep).class_signature().map(|_| ())
}

/// Checks that `text` is a valid method signature.
///
/// The error carries a [`GrammarError::InvalidSignature`].
pub fn check_method_signature(text: &str) -> Result<()> {
	SignatureRemapper::new(text, &mut keep).method_signature().map(|_| ())
}

/// Checks that `text` is a valid field signature.
///
/// The error carries a [`GrammarError::InvalidSignature`].
pub fn check_field_signature(text: &str) -> Result<()> {
	SignatureRemapper::new(text, &mut keep).field_signature().map(|_| ())
}

/// Rewrites the class names in a class signature.
///
/// The function `f` is called for each class name (including the `$`-joined names of inner classes), and returns
/// `None` to keep the name.
pub fn remap_class_signature<F>(text: &str, f: &mut F) -> Result<String>
where
	F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
{
	SignatureRemapper::new(text, f).class_signature()
}

/// Rewrites the class names in a method signature, see [`remap_class_signature`].
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use duke::tree::class::ClassName;
/// use duke::tree::signature::remap_method_signature;
///
/// let remapped = remap_method_signature("<T:La;>(TT;Ljava/util/List<+La;>;)La;^TE;", &mut |name| {
///     Ok((name == "a").then(|| ClassName::try_from("org/Foo")).transpose()?)
/// }).unwrap();
/// assert_eq!(remapped, "<T:Lorg/Foo;>(TT;Ljava/util/List<+Lorg/Foo;>;)Lorg/Foo;^TE;");
/// ```
pub fn remap_method_signature<F>(text: &str, f: &mut F) -> Result<String>
where
	F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
{
	SignatureRemapper::new(text, f).method_signature()
}

/// Rewrites the class names in a field signature, see [`remap_class_signature`].
pub fn remap_field_signature<F>(text: &str, f: &mut F) -> Result<String>
where
	F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
{
	SignatureRemapper::new(text, f).field_signature()
}

impl ClassSignatureSlice {
	pub fn remap<F>(&self, f: &mut F) -> Result<ClassSignature>
	where
		F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
	{
		let s = remap_class_signature(self.as_str(), f)?;
		// SAFETY: The output of the remapping follows the same grammar as the input.
		Ok(unsafe { ClassSignature::from_inner_unchecked(s) })
	}
}

impl MethodSignatureSlice {
	pub fn remap<F>(&self, f: &mut F) -> Result<MethodSignature>
	where
		F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
	{
		let s = remap_method_signature(self.as_str(), f)?;
		// SAFETY: The output of the remapping follows the same grammar as the input.
		Ok(unsafe { MethodSignature::from_inner_unchecked(s) })
	}
}

impl FieldSignatureSlice {
	pub fn remap<F>(&self, f: &mut F) -> Result<FieldSignature>
	where
		F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
	{
		let s = remap_field_signature(self.as_str(), f)?;
		// SAFETY: The output of the remapping follows the same grammar as the input.
		Ok(unsafe { FieldSignature::from_inner_unchecked(s) })
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::error::GrammarError;
	use crate::tree::signature::{check_class_signature, check_field_signature, check_method_signature};

	#[test]
	fn valid() {
		for x in [
			"Ljava/lang/Object;",
			"<T:Ljava/lang/Object;>Ljava/lang/Object;Ljava/lang/Comparable<TT;>;",
			"<K::Ljava/lang/Comparable<-TK;>;V:Ljava/lang/Object;>Ljava/util/AbstractMap<TK;TV;>;",
			"<E:Ljava/lang/Enum<TE;>;>Ljava/lang/Object;",
		] {
			assert!(check_class_signature(x).is_ok(), "{x:?}");
		}
		for x in [
			"()V",
			"<T:Ljava/lang/Object;>([TT;)TT;",
			"(Ljava/util/Map<**>;I)Ljava/util/List<+Ljava/lang/Number;>;^TE;^Ljava/io/IOException;",
		] {
			assert!(check_method_signature(x).is_ok(), "{x:?}");
		}
		for x in ["TT;", "[[TT;", "La/Outer<TT;>.Inner<TU;>;", "Ljava/util/List<[I>;"] {
			assert!(check_field_signature(x).is_ok(), "{x:?}");
		}
	}

	#[test]
	fn invalid() {
		for x in ["", "I", "La", "La<>;", "La<TT;;", "TT", "T;", "La/b.;", "La;b", "La//b;"] {
			let e = check_field_signature(x).unwrap_err();
			assert_eq!(e.downcast_ref::<GrammarError>().map(GrammarError::offending_text), Some(x), "{x:?}");
		}
		for x in ["", "<>La;", "<T>La;", "<T:La;", "La;I"] {
			assert!(check_class_signature(x).is_err(), "{x:?}");
		}
		for x in ["", "(", "(V)V", "()", "()V^", "()V^I", "<T:La;>()VV"] {
			assert!(check_method_signature(x).is_err(), "{x:?}");
		}
	}
}
