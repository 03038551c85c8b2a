//! Crate for holding class, field and method mappings, running operations on them, and looking up the mapping
//! that applies to a member reference.
//!
//! The [`tree::mappings::Mappings`] type is the immutable table of renames, created with a
//! [`tree::mappings::MappingsBuilder`]. Operations on mappings (reversing, joining, cleaning and composing) are
//! implemented as methods on it.
//!
//! The [`resolver::Resolver`] finds the class in the inheritance hierarchy that owns a field or method rename, using
//! a [`hierarchy::ClassHierarchyView`] for knowing about super classes, interfaces and declared members.

mod action;

pub mod error;
pub mod exceptions;
pub mod hierarchy;
pub mod remapper;
pub mod resolver;
pub mod tree;
