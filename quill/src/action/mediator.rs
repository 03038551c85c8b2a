use anyhow::Result;
use indexmap::IndexSet;
use crate::action::key_union;
use crate::remapper::ARemapper;
use crate::tree::mappings::{Mappings, MappingsBuilder, MethodExtra, MethodKey};

impl Mappings {
	/// Creates mappings between the targets of two mappings sharing the same source names.
	///
	/// With `self` mapping `A -> B` and `other` mapping `A -> C`, this creates `B -> C`. A name that has no entry on
	/// one of the sides is taken to map to itself. Entries where `B` and `C` are the same are left out.
	///
	/// Method descriptors and exceptions are given in terms of `B`. Parameter names of `other` take precedence.
	pub fn generate_mediator_mappings(&self, other: &Mappings) -> Result<Mappings> {
		let mut builder = MappingsBuilder::new();

		for class in key_union(Some(&self.classes), Some(&other.classes)) {
			let b = self.get_class_name(class);
			let c = other.get_class_name(class);
			if b != c {
				builder.add_class(b.to_owned(), c.to_owned());
			}
		}

		for class in key_union(Some(&self.fields), Some(&other.fields)) {
			let b_class = self.get_class_name(class);
			for field in key_union(self.fields.get(class), other.fields.get(class)) {
				let b = self.get_field_name(class, field).unwrap_or(field);
				let c = other.get_field_name(class, field).unwrap_or(field);
				if b != c {
					builder.add_field(b_class.to_owned(), b.to_owned(), c.to_owned());
				}
			}
		}

		for class in key_union(Some(&self.methods), Some(&other.methods)) {
			let b_class = self.get_class_name(class);
			for key in key_union(self.methods.get(class), other.methods.get(class)) {
				let b = self.get_method_name(class, &key.name, &key.desc).unwrap_or(&key.name);
				let c = other.get_method_name(class, &key.name, &key.desc).unwrap_or(&key.name);
				if b != c {
					let desc = self.map_method_desc(&key.desc)?;
					builder.add_method(b_class.to_owned(), b.to_owned(), desc, c.to_owned());
				}
			}
		}

		for class in key_union(Some(&self.method_extra), Some(&other.method_extra)) {
			let b_class = self.get_class_name(class);
			for key in key_union(self.method_extra.get(class), other.method_extra.get(class)) {
				let ours = self.get_method_extra(class, &key.name, &key.desc);
				let theirs = other.get_method_extra(class, &key.name, &key.desc);

				let exceptions = ours.into_iter().chain(theirs)
					.flat_map(|extra| &extra.exceptions)
					.map(|exception| self.map_class(exception))
					.collect::<Result<IndexSet<_>>>()?;
				let parameters = theirs.filter(|extra| !extra.parameters.is_empty())
					.or(ours)
					.map(|extra| extra.parameters.clone())
					.unwrap_or_default();

				let key = MethodKey {
					name: self.get_method_name(class, &key.name, &key.desc).unwrap_or(&key.name).to_owned(),
					desc: self.map_method_desc(&key.desc)?,
				};
				builder.add_method_extra(b_class.to_owned(), key, MethodExtra { exceptions, parameters });
			}
		}

		Ok(builder.into_mappings())
	}
}
