macro_rules! make_display {
	($owned:ident, $borrowed:ident) => {
		impl std::fmt::Display for $owned {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				std::fmt::Display::fmt(self.as_slice(), f)
			}
		}
		impl std::fmt::Display for $borrowed {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(self.as_str())
			}
		}
	}
}

/// Creates a pair of [String]/[str] like types.
///
/// The owned type wraps a [`String`], the borrowed one wraps a [`str`]. The `is_valid(s) = ...;` part
/// gives the check used by the `TryFrom` implementations, it must evaluate to an [`anyhow::Result<()>`].
///
/// Both types implement [`Hash`], [`Eq`] and [`Ord`] in the same way as the inner string does, so the owned
/// type can be used as a key of a map and be looked up using the borrowed type.
macro_rules! make_string_str_like {
	(
		$( #[$owned_doc:meta] )*
		$owned_vis:vis $owned:ident ;
		$( #[$borrowed_doc:meta] )*
		$borrowed_vis:vis $borrowed:ident ;
		is_valid($s:ident) = $is_valid:expr;
	) => {
		$( #[$owned_doc] )*
		#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord)]
		$owned_vis struct $owned(String);

		$( #[$borrowed_doc] )*
		#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
		#[repr(transparent)]
		$borrowed_vis struct $borrowed(str);

		impl $owned {
			pub fn as_slice(&self) -> &$borrowed {
				self
			}

			pub fn into_inner(self) -> String {
				self.0
			}

			#[doc = concat!("Constructs [`", stringify!($owned), "`] from a [`String`] without checking any content.")]
			///
			/// # Safety
			#[doc = concat!("`s` must only contain valid contents for [`", stringify!($owned), "`]. See [`",
				stringify!($owned), "::check_valid`] for the concrete values that are allowed.")]
			pub const unsafe fn from_inner_unchecked(s: String) -> $owned {
				$owned(s)
			}

			/// Checks if a given value is valid for being represented by this type.
			pub fn check_valid($s: &str) -> anyhow::Result<()> {
				$is_valid
			}

			/// Checks if a given value is valid for being represented by this type.
			///
			#[doc = concat!("This also applies to the slice type, [`", stringify!($borrowed), "`].")]
			pub fn is_valid(inner: &str) -> bool {
				Self::check_valid(inner).is_ok()
			}
		}

		impl $borrowed {
			pub fn as_str(&self) -> &str {
				&self.0
			}

			#[doc = concat!("Constructs [`&", stringify!($borrowed), "`][", stringify!($borrowed),
				"] from a [`&str`][str] without checking any content.")]
			///
			/// # Safety
			#[doc = concat!("`s` must only contain valid contents for [`", stringify!($borrowed), "`].")]
			pub const unsafe fn from_inner_unchecked(s: &str) -> &$borrowed {
				// SAFETY: `$borrowed` is `repr(transparent)` over `str`, so both references have the same layout.
				unsafe { std::mem::transmute::<&str, &$borrowed>(s) }
			}
		}

		impl AsRef<str> for $borrowed {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}

		impl AsRef<str> for $owned {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}

		impl std::borrow::Borrow<$borrowed> for $owned {
			fn borrow(&self) -> &$borrowed {
				self
			}
		}

		impl std::ops::Deref for $owned {
			type Target = $borrowed;

			fn deref(&self) -> &$borrowed {
				// SAFETY: `$owned` always contains valid content for `$borrowed`.
				unsafe { $borrowed::from_inner_unchecked(&self.0) }
			}
		}

		impl std::borrow::ToOwned for $borrowed {
			type Owned = $owned;

			fn to_owned(&self) -> $owned {
				$owned(self.0.to_owned())
			}
		}

		impl<'a> TryFrom<&'a str> for &'a $borrowed {
			type Error = anyhow::Error;

			fn try_from(value: &'a str) -> anyhow::Result<&'a $borrowed> {
				use anyhow::Context;
				$owned::check_valid(value)
					.with_context(|| anyhow::anyhow!("on value {value:?}"))?;
				// SAFETY: We just checked that `value` is valid.
				Ok(unsafe { $borrowed::from_inner_unchecked(value) })
			}
		}

		impl TryFrom<String> for $owned {
			type Error = anyhow::Error;

			fn try_from(value: String) -> anyhow::Result<$owned> {
				use anyhow::Context;
				$owned::check_valid(&value)
					.with_context(|| anyhow::anyhow!("on value {value:?}"))?;
				Ok($owned(value))
			}
		}

		impl<'a> TryFrom<&'a str> for $owned {
			type Error = anyhow::Error;

			fn try_from(value: &'a str) -> anyhow::Result<$owned> {
				<&$borrowed>::try_from(value).map(std::borrow::ToOwned::to_owned)
			}
		}

		impl From<$owned> for String {
			fn from(value: $owned) -> String {
				value.0
			}
		}

		impl std::hash::Hash for $owned {
			fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
				std::hash::Hash::hash(self.as_slice(), state)
			}
		}

		impl PartialEq<$borrowed> for $owned {
			fn eq(&self, other: &$borrowed) -> bool {
				*self.0 == other.0
			}
		}
		impl PartialEq<$owned> for $borrowed {
			fn eq(&self, other: &$owned) -> bool {
				self.0 == *other.0
			}
		}
		impl<'a> PartialEq<&'a $borrowed> for $owned {
			fn eq(&self, other: &&'a $borrowed) -> bool {
				*self.0 == other.0
			}
		}
		impl PartialEq<str> for $owned {
			fn eq(&self, other: &str) -> bool {
				self.0 == *other
			}
		}
		impl<'a> PartialEq<&'a str> for $owned {
			fn eq(&self, other: &&'a str) -> bool {
				self.0 == **other
			}
		}
		impl PartialEq<str> for $borrowed {
			fn eq(&self, other: &str) -> bool {
				self.0 == *other
			}
		}
	}
}

/// Creates a struct of access flags, with `u16` conversions according to the Java Virtual Machine Specification.
///
/// Each flag is given as `field = mask as "keyword"`, where the keyword is used for the [`Debug`] implementation.
macro_rules! make_access_flags {
	(
		$( #[$doc:meta] )*
		$vis:vis $name:ident {
			$( $field:ident = $mask:literal as $word:literal ),* $(,)?
		}
	) => {
		$( #[$doc] )*
		#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
		$vis struct $name {
			$( pub $field: bool, )*
		}

		impl std::fmt::Debug for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(concat!(stringify!($name), " { "))?;
				$( if self.$field { f.write_str(concat!($word, " "))?; } )*
				f.write_str("}")
			}
		}

		impl From<u16> for $name {
			fn from(value: u16) -> Self {
				$name {
					$( $field: value & $mask != 0, )*
				}
			}
		}

		impl From<$name> for u16 {
			fn from(value: $name) -> Self {
				0 $( | if value.$field { $mask } else { 0 } )*
			}
		}
	}
}

pub(crate) use {make_access_flags, make_display, make_string_str_like};
