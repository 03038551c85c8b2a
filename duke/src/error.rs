use thiserror::Error;

/// A violation of the descriptor or signature grammar.
///
/// These are attached to the [`anyhow::Error`] chain, use [`anyhow::Error::downcast_ref`] to get to them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrammarError {
	#[error("invalid descriptor {descriptor:?}: {reason}")]
	InvalidDescriptor {
		descriptor: String,
		reason: String,
	},

	#[error("invalid signature {signature:?}: {reason}")]
	InvalidSignature {
		signature: String,
		reason: String,
	},
}

impl GrammarError {
	pub(crate) fn descriptor(descriptor: &str, reason: impl Into<String>) -> GrammarError {
		GrammarError::InvalidDescriptor {
			descriptor: descriptor.to_owned(),
			reason: reason.into(),
		}
	}

	pub(crate) fn signature(signature: &str, reason: impl Into<String>) -> GrammarError {
		GrammarError::InvalidSignature {
			signature: signature.to_owned(),
			reason: reason.into(),
		}
	}

	/// Returns the text that failed to parse.
	pub fn offending_text(&self) -> &str {
		match self {
			GrammarError::InvalidDescriptor { descriptor, .. } => descriptor,
			GrammarError::InvalidSignature { signature, .. } => signature,
		}
	}
}
