//! Chunked arena allocator
//!
//! All storage for one CCB record comes from its arena: a list of
//! fixed-size chunks that grows as staged operations are appended and is
//! freed as one unit when the record is deleted. Nothing is ever freed
//! individually, which is what makes bulk teardown on commit/abort cheap
//! and safe.
//!
//! Allocations are identified by copyable handles ([`ArenaRef`],
//! [`StrRef`]) resolved against the owning arena, not by pointers. Handles
//! from one arena must not be resolved against another; doing so yields an
//! out-of-bounds panic or unrelated bytes.
//!
//! Exhaustion is fatal by policy: if a chunk buffer cannot be reserved the
//! configured [`ExhaustionHook`] is invoked and never returns. This layer
//! runs inside daemons that already treat memory exhaustion as fatal.

use std::sync::Arc;

/// Standard chunk payload size in bytes
///
/// Requests larger than this get a dedicated, exactly-sized chunk.
pub const CHUNK_SIZE: usize = 4000;

/// Policy invoked when a chunk buffer cannot be allocated
///
/// The hook must diverge: abort, panic, or otherwise never return. The
/// default, [`AbortOnExhaustion`], logs and aborts the process.
pub trait ExhaustionHook: Send + Sync {
    /// Called with the size of the reservation that failed
    fn exhausted(&self, requested: usize) -> !;
}

/// Default exhaustion policy: log to stderr and the tracing sink, then
/// abort
#[derive(Debug, Default, Clone, Copy)]
pub struct AbortOnExhaustion;

impl ExhaustionHook for AbortOnExhaustion {
    fn exhausted(&self, requested: usize) -> ! {
        tracing::error!(requested, "arena chunk allocation failed");
        eprintln!("arena chunk allocation failed ({} bytes)", requested);
        std::process::abort();
    }
}

/// Handle to a byte region inside an [`Arena`]
///
/// `len` is the requested (unrounded) length; accounting inside the arena
/// rounds up to a 4-byte boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaRef {
    chunk: usize,
    offset: usize,
    len: usize,
}

impl ArenaRef {
    /// Length of the referenced region in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for zero-length regions
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Handle to a UTF-8 string stored in an [`Arena`]
///
/// Only produced by [`Arena::copy_str`], which guarantees the referenced
/// bytes are valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrRef(ArenaRef);

impl StrRef {
    /// Length of the string in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct Chunk {
    buf: Box<[u8]>,
    free: usize,
}

impl Chunk {
    fn new(size: usize, hook: &dyn ExhaustionHook) -> Chunk {
        let mut buf: Vec<u8> = Vec::new();
        if buf.try_reserve_exact(size).is_err() {
            hook.exhausted(size);
        }
        buf.resize(size, 0);
        Chunk {
            buf: buf.into_boxed_slice(),
            free: size,
        }
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }
}

/// Chunked allocator whose allocations live exactly as long as the arena
///
/// Allocation never fails observably; see [`ExhaustionHook`]. Dropping the
/// arena frees every chunk in one pass, and the borrow checker enforces
/// that no handle is resolved afterwards.
pub struct Arena {
    chunks: Vec<Chunk>,
    hook: Arc<dyn ExhaustionHook>,
}

impl Arena {
    /// Create an arena with one standard chunk and the default abort policy
    pub fn new() -> Self {
        Self::with_hook(Arc::new(AbortOnExhaustion))
    }

    /// Create an arena with a custom exhaustion policy
    pub fn with_hook(hook: Arc<dyn ExhaustionHook>) -> Self {
        let chunks = vec![Chunk::new(CHUNK_SIZE, hook.as_ref())];
        Arena { chunks, hook }
    }

    /// Allocate `size` zero-filled bytes
    ///
    /// Accounting rounds the request up to a 4-byte boundary so that
    /// consecutive regions stay aligned for typical scalar copies. Requests
    /// above [`CHUNK_SIZE`] get a dedicated chunk with no remaining free
    /// space; smaller requests take the first existing chunk with room,
    /// else a fresh standard chunk.
    pub fn alloc(&mut self, size: usize) -> ArenaRef {
        let rounded = (size + 3) & !3;

        if rounded > CHUNK_SIZE {
            let mut chunk = Chunk::new(rounded, self.hook.as_ref());
            chunk.free = 0;
            self.chunks.push(chunk);
            return ArenaRef {
                chunk: self.chunks.len() - 1,
                offset: 0,
                len: size,
            };
        }

        for (index, chunk) in self.chunks.iter_mut().enumerate() {
            if chunk.free >= rounded {
                let offset = chunk.capacity() - chunk.free;
                chunk.free -= rounded;
                return ArenaRef {
                    chunk: index,
                    offset,
                    len: size,
                };
            }
        }

        let mut chunk = Chunk::new(CHUNK_SIZE, self.hook.as_ref());
        chunk.free -= rounded;
        self.chunks.push(chunk);
        ArenaRef {
            chunk: self.chunks.len() - 1,
            offset: 0,
            len: size,
        }
    }

    /// Copy `data` into the arena
    pub fn copy_bytes(&mut self, data: &[u8]) -> ArenaRef {
        let region = self.alloc(data.len());
        self.chunks[region.chunk].buf[region.offset..region.offset + region.len]
            .copy_from_slice(data);
        region
    }

    /// Copy a string into the arena
    pub fn copy_str(&mut self, s: &str) -> StrRef {
        StrRef(self.copy_bytes(s.as_bytes()))
    }

    /// Resolve a byte region handle
    pub fn bytes(&self, region: ArenaRef) -> &[u8] {
        &self.chunks[region.chunk].buf[region.offset..region.offset + region.len]
    }

    /// Resolve a string handle
    pub fn str(&self, s: StrRef) -> &str {
        std::str::from_utf8(self.bytes(s.0)).expect("StrRef references UTF-8 bytes")
    }

    /// Number of chunks currently owned (diagnostics)
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Remaining free bytes in the chunk at `index` (diagnostics)
    pub fn chunk_free(&self, index: usize) -> Option<usize> {
        self.chunks.get(index).map(|c| c.free)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("chunks", &self.chunks.len())
            .finish()
    }
}
