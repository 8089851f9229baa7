//! Convenient imports for ccbstage.
//!
//! Re-exports the types most staging code touches:
//!
//! ```
//! use ccbstage::prelude::*;
//!
//! let mut registry = CcbRegistry::new();
//! registry.get_or_create(CcbId::new(1)).add_delete("obj=1");
//! ```

// Registry and staged forms
pub use ccb_staging::{CcbRecord, CcbRegistry, OperationKind, StagedOperation, StagedValue};

// Attribute model
pub use ccb_core::{Attr, AttrMod, CcbId, ModType, Value, ValueType};

// Error handling
pub use ccb_core::{Error, Result};
