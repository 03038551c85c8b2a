use anyhow::Result;
use indexmap::{IndexMap, IndexSet};
use duke::tree::class::ClassNameSlice;
use crate::remapper::ARemapper;
use crate::tree::mappings::{Mappings, MappingsBuilder};

impl Mappings {
	/// Chains two mappings together.
	///
	/// With `self` mapping `A -> B` and `other` mapping `B -> C`, this creates `A -> C`. Only names `self` has entries
	/// for are part of the result. If `other` has no entry for a `B` name, the `B` name is used.
	pub fn generate_conversion_mappings(&self, other: &Mappings) -> Result<Mappings> {
		let mut builder = MappingsBuilder::new();

		for (a, b) in &self.classes {
			let c = other.get_class_name(b);
			builder.add_class(a.clone(), c.to_owned());
		}

		for (a_class, fields) in &self.fields {
			let b_class = self.get_class_name(a_class);
			for (a, b) in fields {
				let c = other.get_field_name(b_class, b).unwrap_or(b);
				builder.add_field(a_class.clone(), a.clone(), c.to_owned());
			}
		}

		for (a_class, methods) in &self.methods {
			let b_class = self.get_class_name(a_class);
			for (key, b) in methods {
				let b_desc = self.map_method_desc(&key.desc)?;
				let c = other.get_method_name(b_class, b, &b_desc).unwrap_or(b);
				builder.add_method(a_class.clone(), key.name.clone(), key.desc.clone(), c.to_owned());
			}
		}

		// exceptions of `other` are in terms of `B`, bring them back to `A`
		let inverse: IndexMap<&ClassNameSlice, &ClassNameSlice> = self.classes.iter()
			.map(|(a, b)| (b.as_slice(), a.as_slice()))
			.collect();

		for (a_class, extras) in &self.method_extra {
			let b_class = self.get_class_name(a_class);
			for (key, extra) in extras {
				let b_name = self.get_method_name(a_class, &key.name, &key.desc).unwrap_or(&key.name);
				let b_desc = self.map_method_desc(&key.desc)?;

				let mut extra = extra.clone();
				if let Some(theirs) = other.get_method_extra(b_class, b_name, &b_desc) {
					extra.exceptions.extend(theirs.exceptions.iter()
						.map(|exception| inverse.get(&exception.as_slice()).copied().unwrap_or(exception).to_owned())
						.collect::<IndexSet<_>>());
					if !theirs.parameters.is_empty() {
						extra.parameters = theirs.parameters.clone();
					}
				}

				builder.add_method_extra(a_class.clone(), key.clone(), extra);
			}
		}

		Ok(builder.into_mappings())
	}
}

