//! Core types for the CCB staging layer
//!
//! This crate defines the fundamental types shared by every layer:
//! - [`CcbId`]: Identifier for an in-flight configuration change bundle
//! - [`Value`] / [`ValueType`]: The tagged attribute value model
//! - [`Attr`] / [`AttrMod`]: Caller-side attribute containers
//! - [`Error`] / [`Result`]: The canonical error types
//!
//! It also carries the small helper surface that object implementers use
//! when inspecting attribute arrays and object names: typed lookups over
//! `&[Attr]` (see [`attrs`]) and DN token extraction (see [`dn`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attrs;
pub mod dn;
pub mod error;
pub mod types;
pub mod value;

pub use attrs::{Attr, AttrMod};
pub use error::{Error, Result};
pub use types::{CcbId, ModType};
pub use value::{Value, ValueType};
