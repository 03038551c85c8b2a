//! The inheritance index over the classes being remapped.
//!
//! This is built once, from all classes, before any class gets rewritten. It only holds the members other classes
//! can see: non-private fields and non-private methods.

use indexmap::IndexMap;
use log::debug;
use duke::tree::class::{ClassFile, ClassName, ClassNameSlice};
use quill::hierarchy::{ClassHierarchyView, ClassInfo, FieldInfo, MethodInfo};

#[derive(Debug, Clone, Default)]
pub struct InheritanceIndex {
	classes: IndexMap<ClassName, ClassInfo>,
}

impl InheritanceIndex {
	pub fn build(classes: &[ClassFile]) -> InheritanceIndex {
		let classes: IndexMap<_, _> = classes.iter()
			.map(|class| (class.name.clone(), class_info(class)))
			.collect();

		debug!("indexed {} classes", classes.len());

		InheritanceIndex { classes }
	}

	pub fn len(&self) -> usize {
		self.classes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty()
	}
}

fn class_info(class: &ClassFile) -> ClassInfo {
	let fields = class.fields.iter()
		.filter(|field| !field.access.is_private)
		.map(|field| FieldInfo {
			name: field.name.clone(),
			desc: field.descriptor.clone(),
			access: field.access,
		})
		.collect();

	let methods = class.methods.iter()
		.filter(|method| !method.access.is_private && !method.name.is_special())
		.map(|method| MethodInfo {
			name: method.name.clone(),
			desc: method.descriptor.clone(),
			access: method.access,
		})
		.collect();

	ClassInfo {
		super_class: class.super_class.clone(),
		interfaces: class.interfaces.clone(),
		fields,
		methods,
	}
}

impl ClassHierarchyView for InheritanceIndex {
	fn lookup(&self, class: &ClassNameSlice) -> Option<&ClassInfo> {
		self.classes.get(class)
	}
}
