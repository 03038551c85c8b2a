//! In-memory representation of java class files, and the grammar of descriptors and signatures.
//!
//! Reading and writing the binary class file format is not done by this crate. The [`tree`] module holds
//! the structure a class file codec fills in, with every symbolic reference (class names, member names,
//! descriptors and signatures) stored as its own typed value, so that a renaming pass can visit all of them.
//!
//! The [`tree::descriptor`] and [`tree::signature`] modules contain the parsers for descriptors and generic
//! signatures, together with functions to rewrite the class names inside of them.

mod macros;

pub mod error;
pub mod tree;
