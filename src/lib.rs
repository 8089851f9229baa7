//! # ccbstage
//!
//! Transaction staging for configuration change bundles (CCBs).
//!
//! A configuration service delivers each change bundle as a sequence of
//! per-operation callbacks, then asks for a verdict on the bundle as a
//! whole. The data handed to each callback is only valid for that call,
//! so anything the application wants to judge later must be copied.
//! ccbstage does that copying: it stages create, delete and modify
//! operations in per-bundle arenas and hands them back for validation or
//! apply, then frees the whole bundle in one step.
//!
//! ## Quick Start
//!
//! ```
//! use ccbstage::prelude::*;
//!
//! let mut registry = CcbRegistry::new();
//! let id = CcbId::new(42);
//!
//! // Stage operations as callbacks arrive.
//! let record = registry.get_or_create(id);
//! record.add_create_with_name(
//!     "obj=1,app=demo",
//!     "DemoClass",
//!     Some("app=demo"),
//!     &[Attr::single("count", Value::Uint32(5))],
//! )?;
//! record.add_modify("obj=1,app=demo", &[AttrMod::replace("count", Value::Uint32(7))])?;
//!
//! // Walk the bundle at completion time.
//! let record = registry.find(id).unwrap();
//! assert_eq!(record.operations().len(), 2);
//!
//! // Commit or abort: drop everything at once.
//! registry.delete(id);
//! assert!(registry.is_empty());
//! # Ok::<(), ccbstage::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`Value`], [`Attr`], [`AttrMod`] - owned attribute data as the
//!   callback layer sees it, plus parsing and lookup helpers
//! - [`Arena`] - chunked per-bundle allocator, freed as one unit
//! - [`CcbRegistry`] - the map from CCB id to its staged operation list
//!
//! The staging layer is single-threaded by contract; wrap the registry in
//! a mutex if callbacks can arrive on more than one thread.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod prelude;

// Attribute model and helpers
pub use ccb_core::{attrs, dn, Attr, AttrMod, CcbId, ModType, Value, ValueType};

// Error handling
pub use ccb_core::{Error, Result};

// Staging layer
pub use ccb_staging::{
    dup_attr, dup_attrs, dup_mods, dup_value, AbortOnExhaustion, Arena, ArenaRef, CcbRecord,
    CcbRegistry, ExhaustionHook, OperationKind, StagedAttr, StagedAttrMod, StagedOperation,
    StagedValue, StrRef, CHUNK_SIZE,
};
