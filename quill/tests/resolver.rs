use anyhow::Result;
use pretty_assertions::assert_eq;
use duke::tree::class::ClassName;
use duke::tree::field::{FieldAccess, FieldDescriptor, FieldName, FieldRef};
use duke::tree::method::{MethodAccess, MethodDescriptor, MethodName, MethodRef};
use quill::hierarchy::{ClassInfo, FieldInfo, Layered, MethodInfo, NoHierarchy, PlatformHierarchy};
use quill::remapper::BRemapper;
use quill::resolver::{Resolved, Resolver};
use quill::tree::mappings::Mappings;

fn class(super_class: Option<&str>, interfaces: &[&str]) -> Result<ClassInfo> {
	Ok(ClassInfo {
		super_class: super_class.map(ClassName::try_from).transpose()?,
		interfaces: interfaces.iter().copied().map(ClassName::try_from).collect::<Result<_>>()?,
		fields: Vec::new(),
		methods: Vec::new(),
	})
}

fn method(name: &str, desc: &str, access: MethodAccess) -> Result<MethodInfo> {
	Ok(MethodInfo {
		name: MethodName::try_from(name)?,
		desc: MethodDescriptor::try_from(desc)?,
		access,
	})
}

fn field(name: &str, desc: &str, access: FieldAccess) -> Result<FieldInfo> {
	Ok(FieldInfo {
		name: FieldName::try_from(name)?,
		desc: FieldDescriptor::try_from(desc)?,
		access,
	})
}

fn public() -> MethodAccess {
	MethodAccess { is_public: true, ..MethodAccess::default() }
}

#[test]
fn method_on_super_class() -> Result<()> {
	let mut b = class(Some("java/lang/Object"), &[])?;
	b.methods.push(method("foo", "()I", public())?);

	let mut hierarchy = PlatformHierarchy::new("test");
	hierarchy
		.insert(ClassName::try_from("A")?, class(Some("B"), &[])?)
		.insert(ClassName::try_from("B")?, b);

	let mappings = Mappings::builder()
		.add_method_text("B", "foo", "()I", "bar")?
		.build();

	let resolver = Resolver::new(&mappings, &hierarchy);
	let resolved = resolver.resolve_method(
		&ClassName::try_from("A")?,
		&MethodName::try_from("foo")?,
		&MethodDescriptor::try_from("()I")?,
		false,
	);

	assert_eq!(resolved, Some(Resolved {
		owner: ClassName::try_from("B")?,
		name: MethodName::try_from("bar")?,
	}));
	Ok(())
}

#[test]
fn site_mapping_is_used_first() -> Result<()> {
	let mut b = class(None, &[])?;
	b.methods.push(method("foo", "()I", public())?);

	let mut hierarchy = PlatformHierarchy::new("test");
	hierarchy
		.insert(ClassName::try_from("A")?, class(Some("B"), &[])?)
		.insert(ClassName::try_from("B")?, b);

	let mappings = Mappings::builder()
		.add_method_text("A", "foo", "()I", "fromA")?
		.add_method_text("B", "foo", "()I", "fromB")?
		.build();

	let resolver = Resolver::new(&mappings, &hierarchy);
	let resolved = resolver.resolve_method(
		&ClassName::try_from("A")?,
		&MethodName::try_from("foo")?,
		&MethodDescriptor::try_from("()I")?,
		false,
	);

	assert_eq!(resolved.map(|x| x.owner), Some(ClassName::try_from("A")?));
	Ok(())
}

#[test]
fn interfaces_before_super_class() -> Result<()> {
	let abstract_method = method("run", "()V", MethodAccess { is_public: true, is_abstract: true, ..MethodAccess::default() })?;

	let mut i = class(None, &["J"])?;
	i.methods.push(abstract_method.clone());
	let mut j = class(None, &[])?;
	j.methods.push(abstract_method.clone());
	let mut s = class(None, &[])?;
	s.methods.push(method("run", "()V", public())?);

	let mut hierarchy = PlatformHierarchy::new("test");
	hierarchy
		.insert(ClassName::try_from("C")?, class(Some("S"), &["I", "K"])?)
		.insert(ClassName::try_from("I")?, i)
		.insert(ClassName::try_from("J")?, j)
		.insert(ClassName::try_from("S")?, s);

	let name = MethodName::try_from("run")?;
	let desc = MethodDescriptor::try_from("()V")?;
	let site = ClassName::try_from("C")?;

	// the interface `J` of `I` comes before the super class
	let mappings = Mappings::builder()
		.add_method_text("J", "run", "()V", "fromJ")?
		.add_method_text("S", "run", "()V", "fromS")?
		.build();
	let resolver = Resolver::new(&mappings, &hierarchy);
	assert_eq!(resolver.resolve_method(&site, &name, &desc, false).map(|x| x.owner), Some(ClassName::try_from("J")?));

	let mappings = Mappings::builder()
		.add_method_text("I", "run", "()V", "fromI")?
		.add_method_text("J", "run", "()V", "fromJ")?
		.build();
	let resolver = Resolver::new(&mappings, &hierarchy);
	assert_eq!(resolver.resolve_method(&site, &name, &desc, false).map(|x| x.owner), Some(ClassName::try_from("I")?));

	let mappings = Mappings::builder()
		.add_method_text("S", "run", "()V", "fromS")?
		.build();
	let resolver = Resolver::new(&mappings, &hierarchy);
	assert_eq!(resolver.resolve_method(&site, &name, &desc, false).map(|x| x.owner), Some(ClassName::try_from("S")?));
	Ok(())
}

#[test]
fn cyclic_hierarchy_terminates() -> Result<()> {
	let mut hierarchy = PlatformHierarchy::new("broken");
	hierarchy
		.insert(ClassName::try_from("A")?, class(Some("B"), &["I"])?)
		.insert(ClassName::try_from("B")?, class(Some("A"), &["I"])?)
		.insert(ClassName::try_from("I")?, class(None, &["I"])?);

	let mappings = Mappings::builder()
		.add_method_text("Z", "foo", "()V", "bar")?
		.build();

	let resolver = Resolver::new(&mappings, &hierarchy);
	let resolved = resolver.resolve_method(
		&ClassName::try_from("A")?,
		&MethodName::try_from("foo")?,
		&MethodDescriptor::try_from("()V")?,
		false,
	);
	assert_eq!(resolved, None);
	Ok(())
}

#[test]
fn private_and_static_members_are_not_inherited() -> Result<()> {
	let mut b = class(None, &[])?;
	b.methods.push(method("hidden", "()V", MethodAccess { is_private: true, ..MethodAccess::default() })?);
	b.methods.push(method("create", "()V", MethodAccess { is_static: true, ..MethodAccess::default() })?);
	b.fields.push(field("secret", "I", FieldAccess { is_private: true, ..FieldAccess::default() })?);
	b.fields.push(field("COUNT", "I", FieldAccess { is_static: true, ..FieldAccess::default() })?);

	let mut hierarchy = PlatformHierarchy::new("test");
	hierarchy
		.insert(ClassName::try_from("A")?, class(Some("B"), &[])?)
		.insert(ClassName::try_from("B")?, b);

	let mappings = Mappings::builder()
		.add_method_text("B", "hidden", "()V", "renamedHidden")?
		.add_method_text("B", "create", "()V", "renamedCreate")?
		.add_field_text("B", "secret", "renamedSecret")?
		.add_field_text("B", "COUNT", "RENAMED_COUNT")?
		.build();
	let resolver = Resolver::new(&mappings, &hierarchy);

	let a = ClassName::try_from("A")?;
	let v = MethodDescriptor::try_from("()V")?;
	let i = FieldDescriptor::try_from("I")?;

	assert_eq!(resolver.resolve_method(&a, &MethodName::try_from("hidden")?, &v, false), None);
	assert_eq!(resolver.resolve_method(&a, &MethodName::try_from("create")?, &v, false), None);
	assert_eq!(resolver.resolve_method(&a, &MethodName::try_from("create")?, &v, true).map(|x| x.name),
		Some(MethodName::try_from("renamedCreate")?));

	assert_eq!(resolver.resolve_field(&a, &FieldName::try_from("secret")?, &i, false), None);
	assert_eq!(resolver.resolve_field(&a, &FieldName::try_from("COUNT")?, &i, false), None);
	assert_eq!(resolver.resolve_field(&a, &FieldName::try_from("COUNT")?, &i, true).map(|x| x.name),
		Some(FieldName::try_from("RENAMED_COUNT")?));
	Ok(())
}

#[test]
fn constructors_are_never_renamed() -> Result<()> {
	let mappings = Mappings::builder()
		.add_method_text("A", "<init>", "()V", "create")?
		.build();
	let resolver = Resolver::new(&mappings, &NoHierarchy);

	let resolved = resolver.resolve_method(
		&ClassName::try_from("A")?,
		&MethodName::try_from("<init>")?,
		&MethodDescriptor::try_from("()V")?,
		false,
	);
	assert_eq!(resolved, None);
	Ok(())
}

#[test]
fn unknown_classes_only_use_the_site() -> Result<()> {
	let mappings = Mappings::builder()
		.add_field_text("A", "f", "value")?
		.build();
	let resolver = Resolver::new(&mappings, &NoHierarchy);

	let field_ref = FieldRef {
		class: ClassName::try_from("A")?,
		name: FieldName::try_from("f")?,
		desc: FieldDescriptor::try_from("J")?,
	};
	assert_eq!(resolver.map_field_ref(&field_ref, false)?.name, FieldName::try_from("value")?);

	let other_ref = FieldRef { class: ClassName::try_from("Sub")?, ..field_ref };
	assert_eq!(resolver.map_field_ref(&other_ref, false)?.name, FieldName::try_from("f")?);
	Ok(())
}

#[test]
fn declaration_takes_name_of_overridden_method() -> Result<()> {
	let mut platform_object = class(None, &[])?;
	platform_object.methods.push(method("toString", "()Ljava/lang/String;", public())?);
	let mut platform = PlatformHierarchy::new("java 17");
	platform.insert(ClassName::try_from("java/lang/Object")?, platform_object);

	let mut base = class(Some("java/lang/Object"), &[])?;
	base.methods.push(method("a", "()V", public())?);
	base.methods.push(method("b", "()V", MethodAccess { is_public: true, is_final: true, ..MethodAccess::default() })?);
	let mut program = PlatformHierarchy::new("program");
	program
		.insert(ClassName::try_from("Base")?, base)
		.insert(ClassName::try_from("Sub")?, class(Some("Base"), &[])?);

	let hierarchy = Layered::new(&program, &platform);

	let mappings = Mappings::builder()
		.add_method_text("Base", "a", "()V", "tick")?
		.add_method_text("Base", "b", "()V", "sealed")?
		.build();
	let resolver = Resolver::new(&mappings, &hierarchy);

	let sub = ClassName::try_from("Sub")?;
	let v = MethodDescriptor::try_from("()V")?;

	let resolved = resolver.resolve_method_declaration(&sub, &MethodName::try_from("a")?, &v, public());
	assert_eq!(resolved, Some(Resolved { owner: ClassName::try_from("Base")?, name: MethodName::try_from("tick")? }));

	// final methods can't be overridden
	assert_eq!(resolver.resolve_method_declaration(&sub, &MethodName::try_from("b")?, &v, public()), None);

	let private = MethodAccess { is_private: true, ..MethodAccess::default() };
	assert_eq!(resolver.resolve_method_declaration(&sub, &MethodName::try_from("a")?, &v, private), None);

	// not mapped anywhere
	let to_string = MethodDescriptor::try_from("()Ljava/lang/String;")?;
	assert_eq!(resolver.resolve_method_declaration(&sub, &MethodName::try_from("toString")?, &to_string, public()), None);
	Ok(())
}

#[test]
fn method_refs_through_the_hierarchy() -> Result<()> {
	let mut b = class(None, &[])?;
	b.methods.push(method("foo", "(LB;)V", public())?);

	let mut hierarchy = PlatformHierarchy::new("test");
	hierarchy
		.insert(ClassName::try_from("A")?, class(Some("B"), &[])?)
		.insert(ClassName::try_from("B")?, b);

	let mappings = Mappings::builder()
		.add_class_text("A", "net/Apple")?
		.add_class_text("B", "net/Banana")?
		.add_method_text("B", "foo", "(LB;)V", "peel")?
		.build();
	let resolver = Resolver::new(&mappings, &hierarchy);

	let method_ref = MethodRef {
		class: ClassName::try_from("A")?,
		name: MethodName::try_from("foo")?,
		desc: MethodDescriptor::try_from("(LB;)V")?,
	};
	assert_eq!(resolver.map_method_ref(&method_ref, false)?, MethodRef {
		class: ClassName::try_from("net/Apple")?,
		name: MethodName::try_from("peel")?,
		desc: MethodDescriptor::try_from("(Lnet/Banana;)V")?,
	});
	Ok(())
}
