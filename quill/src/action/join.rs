use crate::tree::mappings::Mappings;

impl Mappings {
	/// Creates the union of two mappings.
	///
	/// On keys present in both, the entry of `self` is kept.
	pub fn join(&self, other: &Mappings) -> Mappings {
		let mut result = self.clone();

		for (from, to) in &other.classes {
			result.classes.entry(from.clone()).or_insert_with(|| to.clone());
		}
		for (class, fields) in &other.fields {
			let target = result.fields.entry(class.clone()).or_default();
			for (from, to) in fields {
				target.entry(from.clone()).or_insert_with(|| to.clone());
			}
		}
		for (class, methods) in &other.methods {
			let target = result.methods.entry(class.clone()).or_default();
			for (key, to) in methods {
				target.entry(key.clone()).or_insert_with(|| to.clone());
			}
		}
		for (class, extras) in &other.method_extra {
			let target = result.method_extra.entry(class.clone()).or_default();
			for (key, extra) in extras {
				target.entry(key.clone()).or_insert_with(|| extra.clone());
			}
		}

		result
	}
}
