use indexmap::IndexMap;
use duke::tree::class::ClassNameSlice;
use crate::exceptions::ExceptionSupplement;
use crate::tree::mappings::{Mappings, MethodKey};

impl Mappings {
	/// Removes all entries that map a name to itself.
	///
	/// Method entries with exceptions attached are kept. Classes left without any field or method entries are
	/// removed from the field and method tables.
	pub fn clean(&self) -> Mappings {
		self.clean_retaining(&ExceptionSupplement::default())
	}

	/// Like [`Mappings::clean`], but also keeps the method entries the `supplement` has exceptions for.
	pub fn clean_retaining(&self, supplement: &ExceptionSupplement) -> Mappings {
		let has_exceptions = |class: &ClassNameSlice, key: &MethodKey| {
			self.get_method_extra(class, &key.name, &key.desc).is_some_and(|extra| !extra.exceptions.is_empty()) ||
				supplement.get(class, &key.name, &key.desc).is_some_and(|exceptions| !exceptions.is_empty())
		};

		let classes = self.classes.iter()
			.filter(|(from, to)| from != to)
			.map(|(from, to)| (from.clone(), to.clone()))
			.collect();

		let fields = self.fields.iter()
			.map(|(class, fields)| {
				let fields = fields.iter()
					.filter(|(from, to)| from != to)
					.map(|(from, to)| (from.clone(), to.clone()))
					.collect::<IndexMap<_, _>>();
				(class.clone(), fields)
			})
			.filter(|(_, fields)| !fields.is_empty())
			.collect();

		let methods = self.methods.iter()
			.map(|(class, methods)| {
				let methods = methods.iter()
					.filter(|(key, to)| key.name != **to || has_exceptions(class, key))
					.map(|(key, to)| (key.clone(), to.clone()))
					.collect::<IndexMap<_, _>>();
				(class.clone(), methods)
			})
			.filter(|(_, methods)| !methods.is_empty())
			.collect();

		let method_extra = self.method_extra.iter()
			.map(|(class, extras)| {
				let extras = extras.iter()
					.filter(|(_, extra)| !extra.is_empty())
					.map(|(key, extra)| (key.clone(), extra.clone()))
					.collect::<IndexMap<_, _>>();
				(class.clone(), extras)
			})
			.filter(|(_, extras)| !extras.is_empty())
			.collect();

		Mappings { classes, fields, methods, method_extra }
	}
}
