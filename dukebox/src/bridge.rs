//! Turning bridge methods into normal methods.
//!
//! A bridge method is a synthetic method the compiler emits when an overriding method has a more specific type than
//! the method it overrides. It only calls that more specific method. Once renamed, the bridge and the method it calls
//! may no longer share a name, so the bridge and synthetic flags are removed to keep decompilers from hiding it.

use anyhow::Result;
use log::warn;
use duke::tree::class::{ClassFile, ClassNameSlice};
use duke::tree::method::{Method, MethodNameAndDesc};
use crate::DegradedBridge;

/// Removes the bridge and synthetic flags of all bridge methods in the class that call another method of the class.
///
/// Returns the degraded methods, with the names from before remapping.
pub(crate) fn degrade_bridges(class: &mut ClassFile) -> Result<Vec<DegradedBridge>> {
	let targets = class.methods.iter()
		.map(|method| forwarding_target(&class.name, method, &class.methods))
		.collect::<Result<Vec<_>>>()?;

	let mut degraded = Vec::new();
	for (method, target) in class.methods.iter_mut().zip(targets) {
		let Some(target) = target else {
			continue;
		};

		method.access.is_bridge = false;
		method.access.is_synthetic = false;

		warn!("degraded bridge method {}.{}{} forwarding to {}{}", class.name, method.name, method.descriptor, target.name, target.desc);

		degraded.push(DegradedBridge {
			class: class.name.clone(),
			bridge: MethodNameAndDesc {
				name: method.name.clone(),
				desc: method.descriptor.clone(),
			},
			target,
		});
	}

	Ok(degraded)
}

/// The method a bridge method calls, if it has exactly one call in its code, to a method declared in the same class
/// with the same parameter count but a different descriptor.
fn forwarding_target(class: &ClassNameSlice, bridge: &Method, siblings: &[Method]) -> Result<Option<MethodNameAndDesc>> {
	if !bridge.access.is_bridge || !bridge.access.is_synthetic {
		return Ok(None);
	}
	let Some(code) = &bridge.code else {
		return Ok(None);
	};

	let mut invokes = code.instructions.iter()
		.filter_map(|entry| entry.instruction.as_method_invoke());
	let (Some((invoked, _)), None) = (invokes.next(), invokes.next()) else {
		return Ok(None);
	};

	if invoked.class.as_slice() != class || invoked.desc == bridge.descriptor {
		return Ok(None);
	}

	let target = siblings.iter()
		.find(|method| method.name == invoked.name && method.descriptor == invoked.desc && !method.access.is_bridge);
	let Some(target) = target else {
		return Ok(None);
	};

	if target.descriptor.parameter_count()? != bridge.descriptor.parameter_count()? {
		return Ok(None);
	}

	Ok(Some(MethodNameAndDesc {
		name: target.name.clone(),
		desc: target.descriptor.clone(),
	}))
}
