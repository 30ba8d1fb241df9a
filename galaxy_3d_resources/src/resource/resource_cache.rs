//! Reference-counted cache of named resources
//!
//! A `ResourceCache` owns one caller-supplied `MemoryBlock`, carved once at
//! initialise time into two regions:
//!
//! ```text
//! [ HashIndex: index_slot_count x ResourceReference ][ resource array: max_count x R ]
//! ```
//!
//! The index maps a resource name to its `ResourceReference` (refcount,
//! slot handle, auto_release). The array holds the resources themselves and
//! never moves or resizes, so a slot address stays valid for the whole
//! lifetime of the cache.
//!
//! The index itself is direct-addressed. Names sharing a bucket are told
//! apart here: lookups walk buckets linearly from the name's home bucket and
//! compare the name stored in the referenced slot. A bucket is vacant when
//! its reference has no slot, and removal shifts the following entries back
//! so that no lookup chain is ever broken. With at least one bucket per slot
//! every slot can be filled, whatever the names hash to.
//!
//! Sizing follows a two-phase protocol: `memory_requirement` first, then
//! `initialise` with a block of exactly that size. `create` runs both
//! phases against a `TaggedAllocator` and unwinds on failure.
//!
//! Loading, unloading and the default resource are delegated to a
//! `ResourceLoader`, which talks to the renderer and to nested caches.

use std::mem::size_of;
use bytemuck::{Pod, Zeroable};
use crate::containers::HashIndex;
use crate::error::{Error, Result};
use crate::memory::{Arena, ArenaRegion, MemoryBlock, MemoryTag, TaggedAllocator};
use crate::resource::{ResourceName, ResourceReference, INVALID_ID};
use crate::{engine_bail, engine_err, engine_error, engine_trace, engine_warn};

// ===== HEADER / HANDLE =====

/// Bookkeeping shared by every cached resource type
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ResourceHeader {
    /// Slot index in the resource array, `INVALID_ID` when free
    pub id: u32,
    /// Version of the loaded resource, `INVALID_ID` when free
    pub generation: u32,
    /// Occupancy counter of the slot, kept across release
    pub epoch: u32,
    /// Identifier assigned by the renderer backend
    pub internal_id: u32,
    /// Name the resource was acquired under
    pub name: ResourceName,
}

impl ResourceHeader {
    /// Header of a slot that has never been occupied
    pub const INVALID: ResourceHeader = ResourceHeader {
        id: INVALID_ID,
        generation: INVALID_ID,
        epoch: 0,
        internal_id: INVALID_ID,
        name: ResourceName::EMPTY,
    };

    /// Handle identifying this occupant of the slot
    pub fn handle(&self) -> ResourceHandle {
        ResourceHandle { id: self.id, generation: self.generation, epoch: self.epoch }
    }
}

/// Slot index plus the occupant's generation and the slot's epoch.
///
/// A handle only resolves while the slot still holds the same occupant.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct ResourceHandle {
    pub id: u32,
    pub generation: u32,
    pub epoch: u32,
}

impl ResourceHandle {
    pub const INVALID: ResourceHandle = ResourceHandle { id: INVALID_ID, generation: INVALID_ID, epoch: 0 };

    pub fn is_valid(&self) -> bool {
        self.id != INVALID_ID
    }
}

impl Default for ResourceHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

// ===== TRAITS =====

/// A resource type that can live in a `ResourceCache`
pub trait CachedResource: Pod {
    /// Human-readable kind used in diagnostics ("material", "texture")
    const KIND: &'static str;
    /// Log source of the cache holding this type
    const SOURCE: &'static str;
    /// Reserved name resolving to the default resource
    const DEFAULT_NAME: &'static str;
    /// Tag the cache's backing block is accounted under
    const MEMORY_TAG: MemoryTag;

    fn header(&self) -> &ResourceHeader;
    fn header_mut(&mut self) -> &mut ResourceHeader;

    /// Name the resource was acquired under
    fn name(&self) -> &ResourceName {
        &self.header().name
    }

    /// Handle identifying this occupant of its slot
    fn handle(&self) -> ResourceHandle {
        self.header().handle()
    }
}

/// Per-acquisition configuration
pub trait ResourceConfig {
    /// Release policy adopted on the first acquisition of a name
    fn auto_release(&self) -> bool;
}

/// Creates and destroys the backend side of a resource type
pub trait ResourceLoader<R: CachedResource> {
    type Config: ResourceConfig;

    /// Fill `resource` from `config`, acquiring dependencies and backend objects.
    ///
    /// `resource` is a scratch value: its header already carries the name.
    /// On error the loader must have released anything it acquired.
    fn load(&mut self, config: &Self::Config, resource: &mut R) -> Result<()>;

    /// Release dependencies and backend objects of a loaded resource
    fn unload(&mut self, resource: &mut R);

    /// Build the never-released default resource
    fn create_default(&mut self) -> Result<R>;
}

// ===== CONFIG =====

/// Sizing of a resource cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCacheConfig {
    /// Number of resource slots
    pub max_count: u32,
    /// Number of index buckets, at least `max_count`
    pub index_slot_count: u32,
}

impl ResourceCacheConfig {
    /// One index bucket per resource slot
    pub fn new(max_count: u32) -> Self {
        Self { max_count, index_slot_count: max_count }
    }
}

// ===== CACHE =====

/// Fixed-capacity, reference-counted cache of named resources
pub struct ResourceCache<R: CachedResource> {
    config: ResourceCacheConfig,
    arena: Arena,
    index_region: ArenaRegion,
    array_region: ArenaRegion,
    default_resource: R,
}

/// Pieces of a cache that could not be built, handed back for unwinding
struct Unbuilt<R> {
    error: Error,
    block: Option<MemoryBlock>,
    default_resource: R,
}

impl<R: CachedResource> Unbuilt<R> {
    /// Destroy the default resource and free the block
    fn unwind<L>(mut self, loader: &mut L, allocator: &mut TaggedAllocator) -> Error
    where
        L: ResourceLoader<R>,
    {
        loader.unload(&mut self.default_resource);
        if let Some(block) = self.block {
            allocator.free(block, R::MEMORY_TAG);
        }
        engine_warn!(R::SOURCE, "{} cache construction unwound: {}", R::KIND, self.error);
        self.error
    }
}

/// Where a name lives in the index
enum Bucket {
    /// Bucket holding the name's reference
    Found(u32, ResourceReference),
    /// First vacant bucket on the name's chain
    Vacant(u32),
    /// Every bucket holds another name
    Full,
}

impl<R: CachedResource> ResourceCache<R> {
    /// Exact size of the block `initialise` expects for `config`.
    ///
    /// # Errors
    ///
    /// `InitializationFailed` when either count is zero, when there are
    /// fewer index buckets than slots, or when the size overflows.
    pub fn memory_requirement(config: &ResourceCacheConfig) -> Result<usize> {
        if config.max_count == 0 || config.index_slot_count == 0 {
            engine_bail!(R::SOURCE, InitializationFailed =>
                "max_count and index_slot_count must be > 0, the {} cache cannot be initialised", R::KIND);
        }
        if config.index_slot_count < config.max_count {
            engine_bail!(R::SOURCE, InitializationFailed =>
                "{} index needs at least {} buckets for {} slots, got {}",
                R::KIND, config.max_count, config.max_count, config.index_slot_count);
        }

        let count = config.max_count as usize;
        let index_size = HashIndex::memory_requirement(size_of::<ResourceReference>(), config.index_slot_count);
        match size_of::<R>().checked_mul(count).and_then(|array| array.checked_add(index_size)) {
            Some(total) => Ok(total),
            None => engine_bail!(R::SOURCE, InitializationFailed =>
                "{} {}s do not fit in addressable memory", count, R::KIND),
        }
    }

    /// Carve `block` into index and resource array and seed both with
    /// invalid entries.
    ///
    /// # Errors
    ///
    /// `InitializationFailed` when `block` is not exactly
    /// `memory_requirement(&config)` bytes.
    pub fn initialise(config: ResourceCacheConfig, block: MemoryBlock, default_resource: R) -> Result<Self> {
        Self::build(config, block, default_resource).map_err(|unbuilt| unbuilt.error)
    }

    /// Size, allocate and build a cache in one go.
    ///
    /// The default resource comes from `loader` and the block from
    /// `allocator`. If anything fails after either exists, the default is
    /// unloaded and the block freed before the error is returned.
    pub fn create<L>(config: ResourceCacheConfig, loader: &mut L, allocator: &mut TaggedAllocator) -> Result<Self>
    where
        L: ResourceLoader<R>,
    {
        let size = Self::memory_requirement(&config)?;
        let default_resource = loader.create_default()?;
        let block = allocator.allocate(size, R::MEMORY_TAG);

        let cache = Self::build(config, block, default_resource)
            .map_err(|unbuilt| unbuilt.unwind(loader, allocator))?;
        engine_trace!(R::SOURCE, "{} cache created ({} slots, {} buckets, {}B)",
            R::KIND, config.max_count, config.index_slot_count, size);
        Ok(cache)
    }

    fn build(
        config: ResourceCacheConfig,
        block: MemoryBlock,
        default_resource: R,
    ) -> std::result::Result<Self, Box<Unbuilt<R>>> {
        let mut arena = Arena::with_block(block);
        let (index_region, array_region) = match Self::carve(&config, &mut arena) {
            Ok(regions) => regions,
            Err(error) => {
                return Err(Box::new(Unbuilt { error, block: arena.into_block(), default_resource }));
            }
        };

        let mut cache = Self { config, arena, index_region, array_region, default_resource };

        let Some((mut index, slots)) = cache.parts_mut() else {
            let error = engine_err!(R::SOURCE, InitializationFailed =>
                "{} cache regions could not be mapped", R::KIND);
            return Err(Box::new(Unbuilt {
                error,
                block: cache.arena.into_block(),
                default_resource: cache.default_resource,
            }));
        };
        index.fill(&ResourceReference::INVALID);
        for slot in slots.iter_mut() {
            *slot.header_mut() = ResourceHeader::INVALID;
        }

        Ok(cache)
    }

    fn carve(config: &ResourceCacheConfig, arena: &mut Arena) -> Result<(ArenaRegion, ArenaRegion)> {
        let required = Self::memory_requirement(config)?;
        if arena.capacity() != required {
            engine_bail!(R::SOURCE, InitializationFailed =>
                "{} cache needs a block of exactly {}B, got {}B", R::KIND, required, arena.capacity());
        }

        let index_region = arena.allocate(HashIndex::memory_requirement(
            size_of::<ResourceReference>(),
            config.index_slot_count,
        ))?;
        let array_region = arena.allocate(size_of::<R>() * config.max_count as usize)?;
        Ok((index_region, array_region))
    }

    /// Acquire `name`, loading it from `config` on first reference.
    ///
    /// Returns the default resource for the reserved default name, and
    /// `None` (with an error logged) when the name is invalid, no slot is
    /// free, or the load fails.
    ///
    /// The returned address stays the same for every acquisition of a name
    /// until it is released back to nothing.
    pub fn acquire<L>(&mut self, name: &str, config: &L::Config, loader: &mut L) -> Option<&R>
    where
        L: ResourceLoader<R>,
    {
        if name.eq_ignore_ascii_case(R::DEFAULT_NAME) {
            engine_trace!(R::SOURCE, "'{}' is the default {}, returning it", name, R::KIND);
            return Some(&self.default_resource);
        }

        if name.is_empty() {
            engine_error!(R::SOURCE, "Cannot acquire a {} without a name", R::KIND);
            return None;
        }
        let resource_name = match ResourceName::new(name) {
            Ok(resource_name) => resource_name,
            Err(error) => {
                engine_error!(R::SOURCE, "Cannot acquire {}: {}", R::KIND, error);
                return None;
            }
        };

        let max_count = self.config.max_count;
        let (mut index, slots) = self.parts_mut()?;

        // Local copy only until the acquisition commits
        let (bucket, mut reference) = match locate(&index, slots, name) {
            Bucket::Found(bucket, reference) => (bucket, reference),
            Bucket::Vacant(bucket) => (bucket, ResourceReference::INVALID),
            Bucket::Full => {
                engine_error!(R::SOURCE,
                    "Cannot load {} '{}': every index bucket is taken. Adjust configuration to allow more.",
                    R::KIND, name);
                return None;
            }
        };

        if reference.reference_count == 0 {
            reference.set_auto_release(config.auto_release());
        }
        reference.reference_count += 1;

        let handle = match reference.handle() {
            Some(handle) => {
                engine_trace!(R::SOURCE, "{} '{}' already loaded, ref_count increased to {}",
                    R::KIND, name, reference.reference_count);
                handle
            }
            None => {
                let Some(free) = slots.iter().position(|slot| slot.header().id == INVALID_ID) else {
                    engine_error!(R::SOURCE,
                        "Cannot load {} '{}': all {} {} slots are in use. Adjust configuration to allow more.",
                        R::KIND, name, max_count, R::KIND);
                    return None;
                };

                let mut scratch = R::zeroed();
                *scratch.header_mut() = ResourceHeader { name: resource_name, ..ResourceHeader::INVALID };
                if let Err(error) = loader.load(config, &mut scratch) {
                    engine_error!(R::SOURCE, "Failed to load {} '{}': {}", R::KIND, name, error);
                    return None;
                }

                let previous = *slots[free].header();
                let header = scratch.header_mut();
                header.id = free as u32;
                header.generation = next_generation(previous.generation);
                header.epoch = previous.epoch.wrapping_add(1);
                header.name = resource_name;
                slots[free] = scratch;

                engine_trace!(R::SOURCE, "{} '{}' loaded into slot {} (bucket {}), ref_count {}",
                    R::KIND, name, free, bucket, reference.reference_count);
                reference.handle = free as u32;
                free as u32
            }
        };

        index.set_at(bucket, &reference);
        let slots: &[R] = slots;
        slots.get(handle as usize)
    }

    /// Drop one reference to `name`.
    ///
    /// When the count reaches zero and the resource was acquired with
    /// auto_release, it is unloaded and its slot freed. Ignored for the
    /// default name.
    pub fn release<L>(&mut self, name: &str, loader: &mut L)
    where
        L: ResourceLoader<R>,
    {
        if name.eq_ignore_ascii_case(R::DEFAULT_NAME) {
            engine_trace!(R::SOURCE, "Ignoring release of the default {}", R::KIND);
            return;
        }

        let Some((mut index, slots)) = self.parts_mut() else {
            return;
        };
        let Bucket::Found(bucket, mut reference) = locate(&index, slots, name) else {
            engine_warn!(R::SOURCE,
                "{} '{}' released more times than acquired; it is not loaded", R::KIND, name);
            return;
        };

        if reference.reference_count == 0 {
            engine_warn!(R::SOURCE,
                "{} '{}' released more times than acquired; ref_count stays at 0", R::KIND, name);
        } else {
            reference.reference_count -= 1;
        }

        if reference.reference_count > 0 || !reference.auto_release() {
            engine_trace!(R::SOURCE, "Released {} '{}', ref_count now {} (auto_release={})",
                R::KIND, name, reference.reference_count, reference.auto_release());
            index.set_at(bucket, &reference);
            return;
        }

        if let Some(slot) = reference.handle().and_then(|handle| slots.get_mut(handle as usize)) {
            loader.unload(slot);
            let epoch = slot.header().epoch;
            *slot = R::zeroed();
            *slot.header_mut() = ResourceHeader { epoch, ..ResourceHeader::INVALID };
        }
        vacate(&mut index, slots, bucket);
        engine_trace!(R::SOURCE, "Released {} '{}', slot freed (auto_release)", R::KIND, name);
    }

    /// The pre-built default resource; never counted, never released
    pub fn get_default(&self) -> &R {
        &self.default_resource
    }

    /// Resolve a handle while its slot still holds the same occupant
    pub fn get(&self, handle: ResourceHandle) -> Option<&R> {
        if !handle.is_valid() {
            return None;
        }
        self.slots()
            .get(handle.id as usize)
            .filter(|slot| slot.header().handle() == handle)
    }

    /// Copy of the current reference record for `name`, `INVALID` when it
    /// is not loaded
    pub fn reference(&mut self, name: &str) -> Option<ResourceReference> {
        let (index, slots) = self.parts_mut()?;
        match locate(&index, slots, name) {
            Bucket::Found(_, reference) => Some(reference),
            Bucket::Vacant(_) | Bucket::Full => Some(ResourceReference::INVALID),
        }
    }

    /// Number of occupied slots
    pub fn loaded_count(&self) -> usize {
        self.slots().iter().filter(|slot| slot.header().id != INVALID_ID).count()
    }

    /// Number of slots
    pub fn max_count(&self) -> u32 {
        self.config.max_count
    }

    /// Unload every loaded resource and the default, then hand the backing
    /// block back for freeing.
    pub fn shutdown<L>(mut self, loader: &mut L, allocator: &mut TaggedAllocator) -> Option<MemoryBlock>
    where
        L: ResourceLoader<R>,
    {
        let mut unloaded = 0usize;
        if let Some((_, slots)) = self.parts_mut() {
            for slot in slots.iter_mut().filter(|slot| slot.header().id != INVALID_ID) {
                loader.unload(slot);
                *slot = R::zeroed();
                *slot.header_mut() = ResourceHeader::INVALID;
                unloaded += 1;
            }
        }
        loader.unload(&mut self.default_resource);

        engine_trace!(R::SOURCE, "{} cache shut down, {} {}s unloaded", R::KIND, unloaded, R::KIND);
        self.arena.destroy(allocator)
    }

    fn slots(&self) -> &[R] {
        self.arena
            .bytes(self.array_region)
            .and_then(|bytes| bytemuck::try_cast_slice(bytes).ok())
            .unwrap_or(&[])
    }

    fn parts_mut(&mut self) -> Option<(HashIndex<'_>, &mut [R])> {
        let (index_bytes, array_bytes) = self.arena.split_pair_mut(self.index_region, self.array_region)?;
        let index = HashIndex::create(
            size_of::<ResourceReference>(),
            self.config.index_slot_count,
            index_bytes,
            false,
        ).ok()?;
        let slots = bytemuck::try_cast_slice_mut(array_bytes).ok()?;
        Some((index, slots))
    }
}

/// Walk the buckets from `name`'s home bucket until its reference or a
/// vacant bucket turns up.
fn locate<R: CachedResource>(index: &HashIndex<'_>, slots: &[R], name: &str) -> Bucket {
    let count = index.slot_count();
    let home = index.bucket_index(name);
    for step in 0..count {
        let bucket = following_bucket(home, step, count);
        let Some(reference) = index.get_at::<ResourceReference>(bucket) else {
            return Bucket::Full;
        };
        match reference.handle() {
            None => return Bucket::Vacant(bucket),
            Some(handle) => {
                if slots.get(handle as usize).is_some_and(|slot| *slot.name() == *name) {
                    return Bucket::Found(bucket, reference);
                }
            }
        }
    }
    Bucket::Full
}

/// Empty `bucket`, pulling back later entries of the same chains so that
/// every remaining name stays reachable from its home bucket.
fn vacate<R: CachedResource>(index: &mut HashIndex<'_>, slots: &[R], bucket: u32) {
    let count = index.slot_count();
    let mut hole = bucket;
    for step in 1..count {
        let next = following_bucket(bucket, step, count);
        let Some(reference) = index.get_at::<ResourceReference>(next) else {
            break;
        };
        let Some(slot) = reference.handle().and_then(|handle| slots.get(handle as usize)) else {
            break;
        };

        let home = index.bucket_index(slot.name().as_str());
        if !reaches_without(hole, home, next) {
            index.set_at(hole, &reference);
            hole = next;
        }
    }
    index.set_at(hole, &ResourceReference::INVALID);
}

/// Whether an entry at `at` with home bucket `home` is still reached when
/// `hole` is vacant, i.e. whether `home` lies cyclically in `(hole, at]`.
fn reaches_without(hole: u32, home: u32, at: u32) -> bool {
    if hole <= at {
        hole < home && home <= at
    } else {
        hole < home || home <= at
    }
}

fn following_bucket(start: u32, step: u32, count: u32) -> u32 {
    ((u64::from(start) + u64::from(step)) % u64::from(count)) as u32
}

fn next_generation(previous: u32) -> u32 {
    match previous.wrapping_add(1) {
        INVALID_ID => 0,
        next => next,
    }
}

#[cfg(test)]
#[path = "resource_cache_tests.rs"]
mod tests;
