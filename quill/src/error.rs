use thiserror::Error;

/// Errors of mapping input, attached to the [`anyhow::Error`] chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
	/// A name or descriptor handed to one of the validating entry points of the
	/// [`MappingsBuilder`][crate::tree::mappings::MappingsBuilder] is malformed.
	#[error("malformed mapping input {input:?}: {reason}")]
	MalformedMappingInput {
		input: String,
		reason: String,
	},
}

impl MappingError {
	pub(crate) fn malformed(input: &str, error: &anyhow::Error) -> MappingError {
		MappingError::MalformedMappingInput {
			input: input.to_owned(),
			reason: format!("{error:#}"),
		}
	}
}
