use anyhow::{anyhow, Context, Result};
use indexmap::IndexSet;
use log::{debug, info};
use duke::tree::class::{ClassFile, ClassName, ClassNameSlice, ClassSignature, EnclosingMethod, InnerClass};
use duke::tree::descriptor::Type;
use duke::tree::field::{Field, FieldDescriptor, FieldSignature};
use duke::tree::method::{Method, MethodDescriptor, MethodName, MethodNameAndDesc, MethodParameter, MethodSignature, ParameterFlags, ParameterName};
use duke::tree::method::code::{Code, ConstantDynamic, Exception, Handle, Instruction, InstructionListEntry, InvokeDynamic, Loadable, Lv};
use quill::exceptions::ExceptionSupplement;
use quill::hierarchy::{ClassHierarchyView, Layered};
use quill::remapper::{ARemapper, BRemapper};
use quill::resolver::Resolver;
use quill::tree::mappings::{Mappings, MethodExtra};
use crate::{bridge, RemapOptions, RemapReport};
use crate::index::InheritanceIndex;

/// Remaps all the given classes.
///
/// The `hierarchy` is asked for all classes that aren't part of `classes`, like the ones of the java platform.
/// Member references that can't be resolved, and classes without a mapping, keep their names.
///
/// Fails if any descriptor or signature is malformed. The error names the class it occurred in.
pub fn remap_classes<H>(
	classes: Vec<ClassFile>,
	mappings: &Mappings,
	hierarchy: &H,
	exceptions: &ExceptionSupplement,
	options: &RemapOptions,
) -> Result<(Vec<ClassFile>, RemapReport)>
where
	H: ClassHierarchyView + ?Sized,
{
	info!("remapping {} classes", classes.len());

	let index = InheritanceIndex::build(&classes);
	let hierarchy = Layered::new(&index, hierarchy);

	let remapper = ClassRemapper {
		resolver: Resolver::new(mappings, &hierarchy),
		exceptions,
		options,
	};

	let mut report = RemapReport::default();
	let mut remapped = Vec::with_capacity(classes.len());

	for class in classes {
		let name = class.name.clone();
		let class = remapper.process(class, &mut report)
			.with_context(|| anyhow!("failed to remap class {name}"))?;
		remapped.push(class);
	}

	report.classes = remapped.len();
	info!("remapped {} classes, degraded {} bridge methods", report.classes, report.degraded_bridges.len());

	Ok((remapped, report))
}

struct ClassRemapper<'a, H: ?Sized> {
	resolver: Resolver<'a, H>,
	exceptions: &'a ExceptionSupplement,
	options: &'a RemapOptions,
}

impl<H: ClassHierarchyView + ?Sized> ClassRemapper<'_, H> {
	fn process(&self, mut class: ClassFile, report: &mut RemapReport) -> Result<ClassFile> {
		if self.options.degrade_bridges {
			report.degraded_bridges.extend(bridge::degrade_bridges(&mut class)?);
		}

		let class = self.remap_class(class)?;
		debug!("remapped class to {}", class.name);
		Ok(class)
	}

	fn remap_class(&self, class: ClassFile) -> Result<ClassFile> {
		let r = &self.resolver;

		let ClassFile {
			version,
			access,
			name,
			super_class,
			interfaces,
			fields,
			methods,
			inner_classes,
			enclosing_method,
			signature,
			source_file,
			nest_host_class,
			nest_members,
			permitted_subclasses,
		} = class;

		let fields = fields.into_iter()
			.map(|field| self.remap_field(&name, field))
			.collect::<Result<_>>()?;
		let methods = methods.into_iter()
			.map(|method| {
				let method_name = format!("{}{}", method.name, method.descriptor);
				self.remap_method(&name, method)
					.with_context(|| anyhow!("failed to remap method {method_name}"))
			})
			.collect::<Result<_>>()?;

		Ok(ClassFile {
			version,
			access,
			name: name.remap(r)?,
			super_class: super_class.remap(r)?,
			interfaces: interfaces.remap(r)?,

			fields,
			methods,

			inner_classes: inner_classes.remap(r)?,
			enclosing_method: enclosing_method.remap(r)?,
			signature: signature.remap(r)?,

			source_file,

			nest_host_class: nest_host_class.remap(r)?,
			nest_members: nest_members.remap(r)?,
			permitted_subclasses: permitted_subclasses.remap(r)?,
		})
	}

	fn remap_field(&self, class: &ClassNameSlice, field: Field) -> Result<Field> {
		let r = &self.resolver;

		let name = r.mappings().get_field_name(class, &field.name)
			.map(ToOwned::to_owned)
			.unwrap_or(field.name);

		Ok(Field {
			access: field.access,
			name,
			descriptor: field.descriptor.remap(r)?,
			signature: field.signature.remap(r)?,
		})
	}

	fn remap_method(&self, class: &ClassNameSlice, method: Method) -> Result<Method> {
		let r = &self.resolver;
		let extra = r.mappings().get_method_extra(class, &method.name, &method.descriptor);

		let exceptions = self.merge_exceptions(class, &method, extra)?;
		let parameter_names = extra
			.filter(|_| self.options.apply_parameter_names)
			.map(|extra| extra.parameters.as_slice())
			.filter(|names| !names.is_empty());
		let method_parameters = match parameter_names {
			Some(names) => Some(with_parameter_names(method.method_parameters, names, method.descriptor.parameter_count()?)),
			None => method.method_parameters,
		};

		let name = r.resolve_method_declaration(class, &method.name, &method.descriptor, method.access)
			.map(|resolved| resolved.name)
			.unwrap_or(method.name);

		Ok(Method {
			access: method.access,
			name,
			descriptor: method.descriptor.remap(r)?,
			code: method.code.map(|code| self.remap_code(code)).transpose()?,
			exceptions,
			signature: method.signature.remap(r)?,
			method_parameters,
		})
	}

	/// Merges the exceptions a method declares with the ones from the mappings and the supplement.
	///
	/// The order is: the declared ones, then the ones from the mappings, then the supplied ones. Each exception
	/// only appears once.
	fn merge_exceptions(&self, class: &ClassNameSlice, method: &Method, extra: Option<&MethodExtra>) -> Result<Option<Vec<ClassName>>> {
		let supplied = self.exceptions.get(class, &method.name, &method.descriptor);

		let merged: IndexSet<&ClassName> = method.exceptions.iter().flatten()
			.chain(extra.into_iter().flat_map(|extra| &extra.exceptions))
			.chain(supplied.into_iter().flatten())
			.collect();

		if method.exceptions.is_none() && merged.is_empty() {
			return Ok(None);
		}

		let mapped = merged.into_iter()
			.map(|exception| self.resolver.map_class(exception))
			.collect::<Result<IndexSet<_>>>()?;

		Ok(Some(mapped.into_iter().collect()))
	}

	fn remap_code(&self, code: Code) -> Result<Code> {
		let r = &self.resolver;

		let instructions = code.instructions.into_iter()
			.map(|entry| Ok(InstructionListEntry {
				label: entry.label,
				instruction: self.remap_instruction(entry.instruction)?,
			}))
			.collect::<Result<_>>()?;

		Ok(Code {
			max_stack: code.max_stack,
			max_locals: code.max_locals,
			instructions,
			exception_table: code.exception_table.remap(r)?,
			last_label: code.last_label,
			line_numbers: code.line_numbers,
			local_variables: code.local_variables.remap(r)?,
		})
	}

	fn remap_instruction(&self, instruction: Instruction) -> Result<Instruction> {
		let r = &self.resolver;

		Ok(match instruction {
			Instruction::Ldc(loadable) => Instruction::Ldc(loadable.remap(r)?),

			Instruction::GetStatic(field) => Instruction::GetStatic(r.map_field_ref(&field, true)?),
			Instruction::PutStatic(field) => Instruction::PutStatic(r.map_field_ref(&field, true)?),
			Instruction::GetField(field) => Instruction::GetField(r.map_field_ref(&field, false)?),
			Instruction::PutField(field) => Instruction::PutField(r.map_field_ref(&field, false)?),

			Instruction::InvokeVirtual(method) => Instruction::InvokeVirtual(r.map_method_ref(&method, false)?),
			Instruction::InvokeSpecial(method, is_interface) => Instruction::InvokeSpecial(r.map_method_ref(&method, false)?, is_interface),
			Instruction::InvokeStatic(method, is_interface) => Instruction::InvokeStatic(r.map_method_ref(&method, true)?, is_interface),
			Instruction::InvokeInterface(method) => Instruction::InvokeInterface(r.map_method_ref(&method, false)?),
			Instruction::InvokeDynamic(invoke_dynamic) => Instruction::InvokeDynamic(self.remap_invoke_dynamic(invoke_dynamic)?),

			Instruction::New(class) => Instruction::New(class.remap(r)?),
			Instruction::ANewArray(class) => Instruction::ANewArray(class.remap(r)?),
			Instruction::CheckCast(class) => Instruction::CheckCast(class.remap(r)?),
			Instruction::InstanceOf(class) => Instruction::InstanceOf(class.remap(r)?),
			Instruction::MultiANewArray(class, dimensions) => Instruction::MultiANewArray(class.remap(r)?, dimensions),

			other => other,
		})
	}

	fn remap_invoke_dynamic(&self, invoke_dynamic: InvokeDynamic) -> Result<InvokeDynamic> {
		let r = &self.resolver;

		let name = if self.options.remap_lambda_names {
			self.lambda_method_name(&invoke_dynamic)?
		} else {
			None
		};

		Ok(InvokeDynamic {
			name: name.unwrap_or(invoke_dynamic.name),
			descriptor: invoke_dynamic.descriptor.remap(r)?,
			handle: invoke_dynamic.handle.remap(r)?,
			arguments: invoke_dynamic.arguments.remap(r)?,
		})
	}

	/// Finds the new name of the method a lambda or method reference implements.
	///
	/// For `invokedynamic` instructions bootstrapped by the `LambdaMetafactory`, the name is the one of the method in
	/// the functional interface (the return type of the descriptor), and the first bootstrap argument is the
	/// descriptor of that method.
	fn lambda_method_name(&self, invoke_dynamic: &InvokeDynamic) -> Result<Option<MethodName>> {
		let Handle::InvokeStatic(bootstrap, _) = &invoke_dynamic.handle else {
			return Ok(None);
		};
		if bootstrap.class != "java/lang/invoke/LambdaMetafactory" ||
				!(bootstrap.name == "metafactory" || bootstrap.name == "altMetafactory") {
			return Ok(None);
		}

		let Some(Loadable::MethodType(interface_method_desc)) = invoke_dynamic.arguments.first() else {
			return Ok(None);
		};
		let Some(Type::Object(interface)) = invoke_dynamic.descriptor.parse()?.return_descriptor else {
			return Ok(None);
		};

		Ok(self.resolver.resolve_method(&interface, &invoke_dynamic.name, interface_method_desc, false)
			.map(|resolved| resolved.name))
	}
}

/// Sets the names of the parameters, creating parameter entries where needed.
///
/// Names past the parameter count are ignored.
fn with_parameter_names(parameters: Option<Vec<MethodParameter>>, names: &[ParameterName], count: usize)
		-> Vec<MethodParameter> {
	let mut parameters = parameters.unwrap_or_default();
	for (index, name) in names.iter().take(count).enumerate() {
		match parameters.get_mut(index) {
			Some(parameter) => parameter.name = Some(name.clone()),
			None => parameters.push(MethodParameter {
				name: Some(name.clone()),
				flags: ParameterFlags::default(),
			}),
		}
	}
	parameters
}

/// Remapping a part of a class, where the mapping only depends on the part itself.
trait Mappable: Sized {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self>;
}

impl<T> Mappable for Option<T> where T: Mappable {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		self.map(|x| x.remap(remapper)).transpose()
	}
}

impl<T> Mappable for Vec<T> where T: Mappable {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		self.into_iter()
			.map(|i| i.remap(remapper))
			.collect()
	}
}

impl Mappable for ClassName {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		remapper.map_class_any(&self)
	}
}

impl Mappable for FieldDescriptor {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		remapper.map_field_desc(&self)
	}
}

impl Mappable for MethodDescriptor {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		remapper.map_method_desc(&self)
	}
}

impl Mappable for ClassSignature {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		remapper.map_class_sig(&self)
	}
}

impl Mappable for FieldSignature {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		remapper.map_field_sig(&self)
	}
}

impl Mappable for MethodSignature {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		remapper.map_method_sig(&self)
	}
}

impl Mappable for InnerClass {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		let inner_class = remapper.map_class(&self.inner_class)?;
		let outer_class = self.outer_class.remap(remapper)?;

		// anonymous classes have no name, and unchanged classes keep theirs
		let inner_name = match self.inner_name {
			Some(_) if inner_class != self.inner_class => Some(inner_simple_name(&inner_class, outer_class.as_deref())),
			inner_name => inner_name,
		};

		Ok(InnerClass {
			inner_class,
			outer_class,
			inner_name,
			flags: self.flags,
		})
	}
}

/// Derives the simple name of an inner class from its full name.
///
/// This is the part after `outer$` if the name starts with that, otherwise the last segment of the name.
fn inner_simple_name(inner_class: &ClassNameSlice, outer_class: Option<&ClassNameSlice>) -> String {
	outer_class
		.and_then(|outer_class| inner_class.as_str().strip_prefix(outer_class.as_str()))
		.and_then(|rest| rest.strip_prefix('$'))
		.filter(|rest| !rest.is_empty())
		.unwrap_or_else(|| inner_class.get_innermost_name())
		.to_owned()
}

impl Mappable for EnclosingMethod {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		let method = self.method
			.map(|method| -> Result<MethodNameAndDesc> {
				let name = remapper.map_method_fail(&self.class, &method.name, &method.desc, false)?
					.unwrap_or(method.name);
				Ok(MethodNameAndDesc {
					name,
					desc: method.desc.remap(remapper)?,
				})
			})
			.transpose()?;

		Ok(EnclosingMethod {
			class: self.class.remap(remapper)?,
			method,
		})
	}
}

impl Mappable for Exception {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		Ok(Exception {
			start: self.start,
			end: self.end,
			handler: self.handler,
			catch: self.catch.remap(remapper)?,
		})
	}
}

impl Mappable for Lv {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		Ok(Lv {
			range: self.range,
			name: self.name,
			descriptor: self.descriptor.remap(remapper)?,
			signature: self.signature.remap(remapper)?,
			index: self.index,
		})
	}
}

impl Mappable for Loadable {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		Ok(match self {
			Loadable::Class(class) => Loadable::Class(class.remap(remapper)?),
			Loadable::MethodHandle(handle) => Loadable::MethodHandle(handle.remap(remapper)?),
			Loadable::MethodType(descriptor) => Loadable::MethodType(descriptor.remap(remapper)?),
			Loadable::Dynamic(dynamic) => Loadable::Dynamic(dynamic.remap(remapper)?),
			other => other,
		})
	}
}

impl Mappable for Handle {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		Ok(match self {
			Handle::GetField(field) => Handle::GetField(remapper.map_field_ref(&field, false)?),
			Handle::GetStatic(field) => Handle::GetStatic(remapper.map_field_ref(&field, true)?),
			Handle::PutField(field) => Handle::PutField(remapper.map_field_ref(&field, false)?),
			Handle::PutStatic(field) => Handle::PutStatic(remapper.map_field_ref(&field, true)?),
			Handle::InvokeVirtual(method) => Handle::InvokeVirtual(remapper.map_method_ref(&method, false)?),
			Handle::InvokeStatic(method, is_interface) => Handle::InvokeStatic(remapper.map_method_ref(&method, true)?, is_interface),
			Handle::InvokeSpecial(method, is_interface) => Handle::InvokeSpecial(remapper.map_method_ref(&method, false)?, is_interface),
			Handle::NewInvokeSpecial(method) => Handle::NewInvokeSpecial(remapper.map_method_ref(&method, false)?),
			Handle::InvokeInterface(method) => Handle::InvokeInterface(remapper.map_method_ref(&method, false)?),
		})
	}
}

impl Mappable for ConstantDynamic {
	fn remap(self, remapper: &impl BRemapper) -> Result<Self> {
		Ok(ConstantDynamic {
			name: self.name,
			descriptor: self.descriptor.remap(remapper)?,
			handle: self.handle.remap(remapper)?,
			arguments: self.arguments.remap(remapper)?,
		})
	}
}
