use anyhow::Result;
use indexmap::IndexSet;
use crate::remapper::ARemapper;
use crate::tree::mappings::{Mappings, MappingsBuilder, MethodExtra, MethodKey};

impl Mappings {
	/// Creates mappings going the other way around.
	///
	/// Method descriptors are expressed in terms of the new class names. If two entries map to the same new name,
	/// the later one wins.
	pub fn generate_reverse_mappings(&self) -> Result<Mappings> {
		let mut builder = MappingsBuilder::new();

		for (from, to) in &self.classes {
			builder.add_class(to.clone(), from.clone());
		}

		for (class, fields) in &self.fields {
			let class = self.get_class_name(class);
			for (from, to) in fields {
				builder.add_field(class.to_owned(), to.clone(), from.clone());
			}
		}

		for (class, methods) in &self.methods {
			let new_class = self.get_class_name(class);
			for (key, to) in methods {
				let desc = self.map_method_desc(&key.desc)?;
				builder.add_method(new_class.to_owned(), to.clone(), desc, key.name.clone());
			}
		}

		for (class, extras) in &self.method_extra {
			let new_class = self.get_class_name(class);
			for (key, extra) in extras {
				let name = self.get_method_name(class, &key.name, &key.desc).unwrap_or(&key.name);
				let key = MethodKey {
					name: name.to_owned(),
					desc: self.map_method_desc(&key.desc)?,
				};
				let extra = MethodExtra {
					exceptions: extra.exceptions.iter()
						.map(|exception| self.map_class(exception))
						.collect::<Result<IndexSet<_>>>()?,
					parameters: extra.parameters.clone(),
				};
				builder.add_method_extra(new_class.to_owned(), key, extra);
			}
		}

		Ok(builder.into_mappings())
	}
}
