//! Transaction staging layer for configuration change bundles
//!
//! This crate implements the CCB staging core:
//! - [`Arena`]: chunked allocator servicing one bundle's lifetime, freed as
//!   one unit
//! - Duplication ([`dup`]): deep copies of caller-owned attribute data into
//!   arena storage, so staged operations outlive the caller's originals
//! - [`CcbRegistry`]: the per-process map from CCB id to its staged
//!   operation list
//!
//! The layer is single-threaded by contract: it is meant to be driven from
//! one callback-dispatch thread, and callers that share a registry across
//! threads must serialize access externally.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arena;
pub mod dup;
pub mod registry;

pub use arena::{AbortOnExhaustion, Arena, ArenaRef, ExhaustionHook, StrRef, CHUNK_SIZE};
pub use dup::{dup_attr, dup_attrs, dup_mods, dup_value, StagedAttr, StagedAttrMod, StagedValue};
pub use registry::{CcbRecord, CcbRegistry, OperationKind, StagedOperation};
