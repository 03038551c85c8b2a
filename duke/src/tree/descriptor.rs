//! Parsing and rewriting of field and method descriptors.
//!
//! The grammar is the one from [section 4.3](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.3):
//! ```txt
//! FieldDescriptor:
//!   FieldType
//!
//! MethodDescriptor:
//!   "(" FieldType* ")" ReturnDescriptor
//!
//! ReturnDescriptor:
//!   FieldType | "V"
//!
//! FieldType:
//!   "B" | "C" | "D" | "F" | "I" | "J" | "S" | "Z" |
//!   "L" ClassName ";" |
//!   "[" FieldType
//! ```
use anyhow::Result;
use crate::error::GrammarError;
use crate::tree::class::{ClassName, ClassNameSlice};
use crate::tree::cursor::Cursor;
use crate::tree::field::{FieldDescriptor, FieldDescriptorSlice};
use crate::tree::method::{MethodDescriptor, MethodDescriptorSlice};

/// Represents a type.
///
/// In case of an array, use the [`Type::Array`] variant.
///
/// ```
/// use duke::tree::descriptor::{ArrayType, Type};
///
/// // the type of a java `int`
/// let int_type = Type::I;
///
/// // the type of a java `int[][]`
/// let int_array_type = Type::Array(2, ArrayType::I);
///
/// assert_ne!(int_type, int_array_type);
/// ```
///
/// Never construct the [`Type::Array`] variant with a dimension of zero.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Type {
	/// A `byte`. In rust, this is a `i8`.
	B,
	/// A `char`.
	C,
	/// A `double`. In rust, this is a `f64`.
	D,
	/// A `float`. In rust, this is a `f32`.
	F,
	/// An `int`. In rust, this is a `i32`.
	I,
	/// A `long`. In rust, this is a `i64`.
	J,
	/// A `short`. In rust, this is a `i16`.
	S,
	/// A `boolean`. In rust, this is a `bool`.
	Z,
	/// An instance of the class specified by [`ClassName`].
	Object(ClassName),
	/// An array type, represented by the dimension and the inner [`ArrayType`].
	Array(u8, ArrayType),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ArrayType {
	B,
	C,
	D,
	F,
	I,
	J,
	S,
	Z,
	Object(ClassName),
}

impl Type {
	/// Replaces the class name inside of this type, if there's one.
	///
	/// The function `f` returns `None` if the class name is to be kept.
	pub fn map_class_name<F>(self, f: &mut F) -> Result<Type>
	where
		F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
	{
		Ok(match self {
			Type::Object(class_name) => Type::Object(f(&class_name)?.unwrap_or(class_name)),
			Type::Array(dimension, ArrayType::Object(class_name)) => {
				Type::Array(dimension, ArrayType::Object(f(&class_name)?.unwrap_or(class_name)))
			},
			other => other,
		})
	}

	/// Returns the class name in this type, looking through arrays.
	pub fn class_name(&self) -> Option<&ClassNameSlice> {
		match self {
			Type::Object(class_name) | Type::Array(_, ArrayType::Object(class_name)) => Some(class_name),
			_ => None,
		}
	}
}

fn read_class_name(cursor: &mut Cursor) -> Result<ClassName> {
	let name = cursor.take_until(&[';']);
	if !cursor.eat(';') {
		return Err(GrammarError::descriptor(cursor.text(), "class name not terminated by `;`").into());
	}
	if !crate::tree::names::is_valid_obj_class_name(name) {
		return Err(GrammarError::descriptor(cursor.text(), format!("invalid class name {name:?}")).into());
	}
	// SAFETY: We just checked that it's a valid object class name.
	Ok(unsafe { ClassName::from_inner_unchecked(name.to_owned()) })
}

fn read_field_type(cursor: &mut Cursor) -> Result<Type> {
	let mut array_dimension: u8 = 0;
	while cursor.eat('[') {
		array_dimension = array_dimension.checked_add(1)
			.ok_or_else(|| GrammarError::descriptor(cursor.text(), "array type with more than 255 dimensions"))?;
	}

	let array_type = match cursor.bump() {
		Some('B') => ArrayType::B,
		Some('C') => ArrayType::C,
		Some('D') => ArrayType::D,
		Some('F') => ArrayType::F,
		Some('I') => ArrayType::I,
		Some('J') => ArrayType::J,
		Some('S') => ArrayType::S,
		Some('Z') => ArrayType::Z,
		Some('L') => ArrayType::Object(read_class_name(cursor)?),
		Some(x) => return Err(GrammarError::descriptor(cursor.text(), format!("unexpected char {x:?}")).into()),
		None => return Err(GrammarError::descriptor(cursor.text(), "unexpected abrupt ending").into()),
	};

	Ok(if array_dimension == 0 {
		match array_type {
			ArrayType::B => Type::B,
			ArrayType::C => Type::C,
			ArrayType::D => Type::D,
			ArrayType::F => Type::F,
			ArrayType::I => Type::I,
			ArrayType::J => Type::J,
			ArrayType::S => Type::S,
			ArrayType::Z => Type::Z,
			ArrayType::Object(class_name) => Type::Object(class_name),
		}
	} else {
		Type::Array(array_dimension, array_type)
	})
}

fn write_object(class_name: &ClassNameSlice, string: &mut String) {
	string.push('L');
	string.push_str(class_name.as_str());
	string.push(';');
}

fn write_field_type(t: &Type, string: &mut String) {
	match t {
		Type::B => string.push('B'),
		Type::C => string.push('C'),
		Type::D => string.push('D'),
		Type::F => string.push('F'),
		Type::I => string.push('I'),
		Type::J => string.push('J'),
		Type::S => string.push('S'),
		Type::Z => string.push('Z'),
		Type::Object(class_name) => write_object(class_name, string),
		Type::Array(array_dimension, array_type) => {
			for _ in 0..*array_dimension {
				string.push('[');
			}
			match array_type {
				ArrayType::B => string.push('B'),
				ArrayType::C => string.push('C'),
				ArrayType::D => string.push('D'),
				ArrayType::F => string.push('F'),
				ArrayType::I => string.push('I'),
				ArrayType::J => string.push('J'),
				ArrayType::S => string.push('S'),
				ArrayType::Z => string.push('Z'),
				ArrayType::Object(class_name) => write_object(class_name, string),
			}
		},
	}
}

fn parse_field_descriptor(text: &str) -> Result<Type> {
	let mut cursor = Cursor::new(text);
	let t = read_field_type(&mut cursor)?;
	if !cursor.is_at_end() {
		return Err(GrammarError::descriptor(text, format!("expected end, got {:?} remaining", cursor.rest())).into());
	}
	Ok(t)
}

fn parse_method_descriptor(text: &str) -> Result<ParsedMethodDescriptor> {
	let mut cursor = Cursor::new(text);

	if !cursor.eat('(') {
		return Err(GrammarError::descriptor(text, "method descriptor doesn't start with `(`").into());
	}

	let mut parameter_descriptors = Vec::new();
	while !cursor.eat(')') {
		if cursor.is_at_end() {
			return Err(GrammarError::descriptor(text, "parameter list not terminated by `)`").into());
		}
		parameter_descriptors.push(read_field_type(&mut cursor)?);
	}

	let return_descriptor = if cursor.eat('V') {
		None
	} else {
		Some(read_field_type(&mut cursor)?)
	};

	if !cursor.is_at_end() {
		return Err(GrammarError::descriptor(text, format!("expected end, got {:?} remaining", cursor.rest())).into());
	}

	Ok(ParsedMethodDescriptor { parameter_descriptors, return_descriptor })
}

/// Checks that `text` is a valid field descriptor.
///
/// The error carries a [`GrammarError::InvalidDescriptor`].
pub fn check_field_descriptor(text: &str) -> Result<()> {
	parse_field_descriptor(text).map(|_| ())
}

/// Checks that `text` is a valid method descriptor.
///
/// The error carries a [`GrammarError::InvalidDescriptor`].
pub fn check_method_descriptor(text: &str) -> Result<()> {
	parse_method_descriptor(text).map(|_| ())
}

/// Rewrites the class names in a descriptor.
///
/// If `text` starts with `(`, it's treated as a method descriptor, otherwise as a field descriptor. Each
/// parameter and the return type are remapped on their own. Array dimensions and primitive types stay as they are.
///
/// The function `f` gets called for each class name, and returns `None` to keep that name. A descriptor
/// where `f` keeps every name is returned byte-identical.
///
/// # Examples
/// ```
/// # use pretty_assertions::assert_eq;
/// use duke::tree::class::ClassName;
/// use duke::tree::descriptor::remap_descriptor;
///
/// let remapped = remap_descriptor("(La/b/C;I)La/b/C;", &mut |name| {
///     Ok((name == "a/b/C").then(|| ClassName::try_from("com/example/Foo")).transpose()?)
/// }).unwrap();
/// assert_eq!(remapped, "(Lcom/example/Foo;I)Lcom/example/Foo;");
/// ```
pub fn remap_descriptor<F>(text: &str, f: &mut F) -> Result<String>
where
	F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
{
	let mut s = String::with_capacity(text.len());
	if text.starts_with('(') {
		parse_method_descriptor(text)?
			.map_class_names(f)?
			.write_into(&mut s);
	} else {
		let t = parse_field_descriptor(text)?.map_class_name(f)?;
		write_field_type(&t, &mut s);
	}
	Ok(s)
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParsedFieldDescriptor(pub Type);

impl FieldDescriptorSlice {
	/// Parses a field descriptor.
	///
	/// The inverse of this function is [`ParsedFieldDescriptor::write`].
	///
	/// # Examples
	/// ```
	/// # use pretty_assertions::assert_eq;
	/// use duke::tree::class::ClassName;
	/// use duke::tree::descriptor::{ArrayType, ParsedFieldDescriptor, Type};
	/// use duke::tree::field::FieldDescriptorSlice;
	///
	/// assert_eq!(
	///     <&FieldDescriptorSlice>::try_from("Ljava/lang/Object;").unwrap().parse().unwrap(),
	///     ParsedFieldDescriptor(Type::Object(ClassName::JAVA_LANG_OBJECT.to_owned()))
	/// );
	/// assert_eq!(
	///     <&FieldDescriptorSlice>::try_from("[[[D").unwrap().parse().unwrap(),
	///     ParsedFieldDescriptor(Type::Array(3, ArrayType::D))
	/// );
	/// ```
	pub fn parse(&self) -> Result<ParsedFieldDescriptor> {
		parse_field_descriptor(self.as_str()).map(ParsedFieldDescriptor)
	}

	/// Rewrites the class name inside of this descriptor, see [`remap_descriptor`].
	pub fn remap<F>(&self, f: &mut F) -> Result<FieldDescriptor>
	where
		F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
	{
		let t = self.parse()?.0.map_class_name(f)?;
		Ok(ParsedFieldDescriptor(t).write())
	}
}

impl ParsedFieldDescriptor {
	/// Writes a field descriptor.
	///
	/// The inverse of this function is [`FieldDescriptorSlice::parse`].
	pub fn write(&self) -> FieldDescriptor {
		let mut s = String::new();
		write_field_type(&self.0, &mut s);
		// SAFETY: Writing out a parsed field descriptor always results in a valid one.
		unsafe { FieldDescriptor::from_inner_unchecked(s) }
	}
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParsedMethodDescriptor {
	pub parameter_descriptors: Vec<Type>,
	/// The return type, `None` for `void`.
	pub return_descriptor: Option<Type>,
}

impl ParsedMethodDescriptor {
	fn map_class_names<F>(self, f: &mut F) -> Result<ParsedMethodDescriptor>
	where
		F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
	{
		Ok(ParsedMethodDescriptor {
			parameter_descriptors: self.parameter_descriptors.into_iter()
				.map(|t| t.map_class_name(f))
				.collect::<Result<_>>()?,
			return_descriptor: self.return_descriptor
				.map(|t| t.map_class_name(f))
				.transpose()?,
		})
	}

	fn write_into(&self, s: &mut String) {
		s.push('(');
		for parameter in &self.parameter_descriptors {
			write_field_type(parameter, s);
		}
		s.push(')');
		match &self.return_descriptor {
			Some(return_descriptor) => write_field_type(return_descriptor, s),
			None => s.push('V'),
		}
	}

	/// Writes a method descriptor.
	///
	/// The inverse of this function is [`MethodDescriptorSlice::parse`].
	pub fn write(&self) -> MethodDescriptor {
		let mut s = String::new();
		self.write_into(&mut s);
		// SAFETY: Writing out a parsed method descriptor always results in a valid one.
		unsafe { MethodDescriptor::from_inner_unchecked(s) }
	}
}

impl MethodDescriptorSlice {
	/// Parses a method descriptor.
	///
	/// The inverse of this function is [`ParsedMethodDescriptor::write`].
	pub fn parse(&self) -> Result<ParsedMethodDescriptor> {
		parse_method_descriptor(self.as_str())
	}

	/// Rewrites the class names inside of this descriptor, see [`remap_descriptor`].
	pub fn remap<F>(&self, f: &mut F) -> Result<MethodDescriptor>
	where
		F: FnMut(&ClassNameSlice) -> Result<Option<ClassName>>,
	{
		Ok(self.parse()?.map_class_names(f)?.write())
	}

	/// Counts the parameters, without looking at their types.
	pub fn parameter_count(&self) -> Result<usize> {
		Ok(self.parse()?.parameter_descriptors.len())
	}
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::error::GrammarError;
	use crate::tree::class::ClassName;
	use crate::tree::descriptor::{check_field_descriptor, check_method_descriptor, remap_descriptor, ArrayType, Type};
	use crate::tree::method::MethodDescriptorSlice;

	#[test]
	fn valid() {
		for x in ["I", "[[J", "Ljava/lang/Object;", "[La/b/C;", "Lä;"] {
			assert!(check_field_descriptor(x).is_ok(), "{x:?}");
		}
		for x in ["()V", "(IJ)Z", "([La/B;Lc;)[[I", "(Ljava/lang/String;)La;"] {
			assert!(check_method_descriptor(x).is_ok(), "{x:?}");
		}
	}

	#[test]
	fn invalid() {
		for x in ["", "V", "[V", "L;", "La/b", "La//b;", "La.b;", "II", "Q", "[", "(I)V"] {
			let e = check_field_descriptor(x).unwrap_err();
			assert_eq!(e.downcast_ref::<GrammarError>().map(GrammarError::offending_text), Some(x), "{x:?}");
		}
		for x in ["", "V", "(", "(I", "(V)V", "()", "()VV", "I()V", "(L)V"] {
			assert!(check_method_descriptor(x).is_err(), "{x:?}");
		}
	}

	#[test]
	fn too_many_dimensions() {
		let x = "[".repeat(256) + "I";
		assert!(check_field_descriptor(&x).is_err());
		let x = "[".repeat(255) + "I";
		assert!(check_field_descriptor(&x).is_ok());
	}

	#[test]
	fn parse_method() -> Result<()> {
		let desc = <&MethodDescriptorSlice>::try_from("(I[[La/B;)V")?;
		let parsed = desc.parse()?;
		assert_eq!(parsed.parameter_descriptors, vec![
			Type::I,
			Type::Array(2, ArrayType::Object(ClassName::try_from("a/B")?)),
		]);
		assert_eq!(parsed.return_descriptor, None);
		assert_eq!(parsed.write(), desc);
		assert_eq!(desc.parameter_count()?, 2);
		Ok(())
	}

	#[test]
	fn unmapped_stays_identical() -> Result<()> {
		for x in ["()V", "(IJ[[Ljava/lang/Object;)La/b;", "[[[D", "Lfoo;"] {
			assert_eq!(remap_descriptor(x, &mut |_| Ok(None))?, x);
		}
		Ok(())
	}

	#[test]
	fn error_from_mapper_is_propagated() {
		let result = remap_descriptor("(La;)V", &mut |_| anyhow::bail!("mapper failed"));
		assert_eq!(result.unwrap_err().to_string(), "mapper failed");
	}
}
