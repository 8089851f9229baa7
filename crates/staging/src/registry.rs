//! CCB registry: staged operation lists keyed by bundle id
//!
//! A [`CcbRegistry`] maps each in-flight configuration change bundle to a
//! [`CcbRecord`]: an arena plus the ordered list of operations staged so
//! far. Records materialize lazily on the first reported operation
//! (find-or-create, there is no explicit "begin"), accumulate operations
//! over the bundle's open lifetime, and are deleted in one step when the
//! protocol layer reports commit or abort. Deleting a record drops its
//! arena and with it every staged payload.
//!
//! The registry is an owned object, not process-global state; embed one
//! per dispatcher. No locking is done here: callers that share a registry
//! across threads must serialize access externally.

use std::sync::Arc;

use ccb_core::{Attr, AttrMod, CcbId, Result};
use tracing::{debug, trace};

use crate::arena::{AbortOnExhaustion, Arena, ExhaustionHook, StrRef};
use crate::dup::{dup_attrs, dup_mods, StagedAttr, StagedAttrMod};

/// The variant payload of a staged operation
#[derive(Debug)]
pub enum OperationKind {
    /// Stage the creation of a new object
    Create {
        /// Class of the object to create
        class_name: StrRef,
        /// Parent object name, if the object is not a root
        parent: Option<StrRef>,
        /// Initial attributes
        attrs: Vec<StagedAttr>,
    },
    /// Stage the deletion of an object
    Delete {
        /// Name of the object to delete
        object_name: StrRef,
    },
    /// Stage attribute modifications on an object
    Modify {
        /// Name of the object to modify
        object_name: StrRef,
        /// The modifications, in the order supplied
        mods: Vec<StagedAttrMod>,
    },
}

/// One staged operation
///
/// Never mutated after staging; destroyed only with the whole record.
/// Besides the variant payload it carries the owning bundle id, its
/// position in the record's list, and the target object name used as the
/// lookup key. The key duplicates the variant's own name field so that
/// name scans need not match on the variant; for a create staged without
/// an explicit object name the key is the empty string.
#[derive(Debug)]
pub struct StagedOperation {
    ccb_id: CcbId,
    seq: u64,
    object_name: StrRef,
    kind: OperationKind,
}

impl StagedOperation {
    /// Id of the bundle this operation belongs to
    pub fn ccb_id(&self) -> CcbId {
        self.ccb_id
    }

    /// Position of this operation in its record's list, starting at 0
    ///
    /// Feed this to [`CcbRegistry::next_operation`] to continue a forward
    /// iteration from this operation.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The operation payload
    pub fn kind(&self) -> &OperationKind {
        &self.kind
    }

    /// The lookup-key object name, resolved against the record's arena
    pub fn object_name<'a>(&self, arena: &'a Arena) -> &'a str {
        arena.str(self.object_name)
    }
}

/// One in-flight bundle: its id, its arena, and its staged operations
pub struct CcbRecord {
    id: CcbId,
    arena: Arena,
    ops: Vec<StagedOperation>,
}

impl CcbRecord {
    fn new(id: CcbId, hook: Arc<dyn ExhaustionHook>) -> Self {
        CcbRecord {
            id,
            arena: Arena::with_hook(hook),
            ops: Vec::new(),
        }
    }

    /// Bundle id this record is keyed by
    pub fn id(&self) -> CcbId {
        self.id
    }

    /// The arena owning every staged payload in this record
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// All staged operations, in insertion order
    pub fn operations(&self) -> &[StagedOperation] {
        &self.ops
    }

    /// Stage the creation of an object whose name the service will assign
    ///
    /// The lookup key of the resulting descriptor is the empty string.
    pub fn add_create(
        &mut self,
        class_name: &str,
        parent: Option<&str>,
        attrs: &[Attr],
    ) -> Result<&StagedOperation> {
        let key = self.arena.copy_str("");
        self.stage_create(key, class_name, parent, attrs)
    }

    /// Stage the creation of an object with an explicitly assigned name
    ///
    /// Needed when the protocol fixes the object's full name before the
    /// creation completes; the name becomes the descriptor's lookup key.
    pub fn add_create_with_name(
        &mut self,
        object_name: &str,
        class_name: &str,
        parent: Option<&str>,
        attrs: &[Attr],
    ) -> Result<&StagedOperation> {
        let key = self.arena.copy_str(object_name);
        self.stage_create(key, class_name, parent, attrs)
    }

    fn stage_create(
        &mut self,
        key: StrRef,
        class_name: &str,
        parent: Option<&str>,
        attrs: &[Attr],
    ) -> Result<&StagedOperation> {
        let class_name = self.arena.copy_str(class_name);
        let parent = parent.map(|p| self.arena.copy_str(p));
        let attrs = dup_attrs(&mut self.arena, attrs)?;
        Ok(self.push_op(
            key,
            OperationKind::Create {
                class_name,
                parent,
                attrs,
            },
        ))
    }

    /// Stage the deletion of an object
    pub fn add_delete(&mut self, object_name: &str) -> &StagedOperation {
        let name = self.arena.copy_str(object_name);
        self.push_op(name, OperationKind::Delete { object_name: name })
    }

    /// Stage attribute modifications on an object
    ///
    /// Staging a second operation against an object already targeted in
    /// this bundle is currently allowed; all operations are preserved in
    /// list order. [`ccb_core::Error::DuplicateOperation`] is reserved for
    /// a future guard against it.
    pub fn add_modify(
        &mut self,
        object_name: &str,
        mods: &[AttrMod],
    ) -> Result<&StagedOperation> {
        let name = self.arena.copy_str(object_name);
        let mods = dup_mods(&mut self.arena, mods)?;
        Ok(self.push_op(
            name,
            OperationKind::Modify {
                object_name: name,
                mods,
            },
        ))
    }

    /// First staged operation whose lookup key equals `name`
    pub fn find_by_name(&self, name: &str) -> Option<&StagedOperation> {
        self.ops
            .iter()
            .find(|op| op.object_name(&self.arena) == name)
    }

    /// The operation following `prev` in insertion order
    ///
    /// `None` for `prev` yields the head of the list.
    pub fn operation_after(&self, prev: Option<u64>) -> Option<&StagedOperation> {
        match prev {
            None => self.ops.first(),
            Some(seq) => self.ops.get(seq as usize + 1),
        }
    }

    fn push_op(&mut self, object_name: StrRef, kind: OperationKind) -> &StagedOperation {
        let seq = self.ops.len() as u64;
        trace!(ccb_id = %self.id, seq, "staging operation");
        let index = self.ops.len();
        self.ops.push(StagedOperation {
            ccb_id: self.id,
            seq,
            object_name,
            kind,
        });
        &self.ops[index]
    }
}

impl std::fmt::Debug for CcbRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CcbRecord")
            .field("id", &self.id)
            .field("ops", &self.ops.len())
            .finish()
    }
}

/// Registry of all in-flight bundles in this process
///
/// Lookup is a linear scan by bundle id; the live set is small (one entry
/// per open bundle).
pub struct CcbRegistry {
    records: Vec<CcbRecord>,
    hook: Arc<dyn ExhaustionHook>,
}

impl CcbRegistry {
    /// Create an empty registry with the default abort-on-exhaustion
    /// policy
    pub fn new() -> Self {
        Self::with_hook(Arc::new(AbortOnExhaustion))
    }

    /// Create an empty registry with a custom exhaustion policy
    ///
    /// The policy is handed to every record arena the registry creates.
    pub fn with_hook(hook: Arc<dyn ExhaustionHook>) -> Self {
        CcbRegistry {
            records: Vec::new(),
            hook,
        }
    }

    /// The record for `id`, if one exists
    pub fn find(&self, id: CcbId) -> Option<&CcbRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Mutable access to the record for `id`, if one exists
    pub fn find_mut(&mut self, id: CcbId) -> Option<&mut CcbRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// The record for `id`, created (new arena, empty operation list) if
    /// absent
    ///
    /// This is the standard entry point for staging calls: a record
    /// materializes on the first reported operation of its bundle.
    pub fn get_or_create(&mut self, id: CcbId) -> &mut CcbRecord {
        let index = match self.records.iter().position(|r| r.id == id) {
            Some(index) => index,
            None => {
                debug!(ccb_id = %id, "creating ccb record");
                self.records.push(CcbRecord::new(id, Arc::clone(&self.hook)));
                self.records.len() - 1
            }
        };
        &mut self.records[index]
    }

    /// Remove the record for `id` and free its arena
    ///
    /// Every staged operation and attribute of the bundle is invalidated.
    /// Returns false if no record existed.
    pub fn delete(&mut self, id: CcbId) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) => {
                let record = self.records.remove(index);
                debug!(ccb_id = %id, ops = record.ops.len(), "deleting ccb record");
                true
            }
            None => false,
        }
    }

    /// True iff no bundle is in flight
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of in-flight bundles
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Forward iteration over a bundle's staged operations
    ///
    /// Pass `None` to start from the head (this materializes the record
    /// via [`CcbRegistry::get_or_create`]); pass the last returned
    /// operation's [`StagedOperation::seq`] to advance. Restartable from
    /// the head at any time; there is no protection against staging new
    /// operations mid-iteration.
    pub fn next_operation(&mut self, id: CcbId, prev: Option<u64>) -> Option<&StagedOperation> {
        match prev {
            None => self.get_or_create(id).operation_after(None),
            Some(seq) => self.find(id)?.operation_after(Some(seq)),
        }
    }

    /// First staged operation of bundle `id` whose lookup key equals
    /// `name`
    ///
    /// Materializes the record via [`CcbRegistry::get_or_create`], like a
    /// from-head iteration.
    pub fn find_operation_by_name(&mut self, id: CcbId, name: &str) -> Option<&StagedOperation> {
        let record: &CcbRecord = self.get_or_create(id);
        record.find_by_name(name)
    }
}

impl Default for CcbRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CcbRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CcbRegistry")
            .field("records", &self.records)
            .finish()
    }
}
