use super::*;

// ============================================================================
// Accounting tests
// ============================================================================

#[test]
fn test_new_allocator_is_empty() {
    let allocator = TaggedAllocator::new();
    assert_eq!(allocator.total_allocated(), 0);
    assert_eq!(allocator.allocation_count(), 0);
    for tag in MemoryTag::ALL {
        assert_eq!(allocator.tagged(tag), 0);
    }
}

#[test]
fn test_allocate_updates_total_tag_and_count() {
    let mut allocator = TaggedAllocator::new();

    let block = allocator.allocate(128, MemoryTag::Material);

    assert_eq!(block.len(), 128);
    assert_eq!(block.tag(), MemoryTag::Material);
    assert_eq!(allocator.total_allocated(), 128);
    assert_eq!(allocator.tagged(MemoryTag::Material), 128);
    assert_eq!(allocator.tagged(MemoryTag::Texture), 0);
    assert_eq!(allocator.allocation_count(), 1);
}

#[test]
fn test_allocate_returns_zeroed_memory() {
    let mut allocator = TaggedAllocator::new();
    let block = allocator.allocate(37, MemoryTag::Array);
    assert!(block.as_bytes().iter().all(|&b| b == 0));
    assert_eq!(block.as_bytes().len(), 37);
}

#[test]
fn test_free_subtracts_from_same_tag() {
    let mut allocator = TaggedAllocator::new();
    let a = allocator.allocate(100, MemoryTag::Texture);
    let b = allocator.allocate(50, MemoryTag::Material);

    allocator.free(a, MemoryTag::Texture);

    assert_eq!(allocator.total_allocated(), 50);
    assert_eq!(allocator.tagged(MemoryTag::Texture), 0);
    assert_eq!(allocator.tagged(MemoryTag::Material), 50);
    // Frees never decrement the allocation counter
    assert_eq!(allocator.allocation_count(), 2);

    allocator.free(b, MemoryTag::Material);
    assert_eq!(allocator.total_allocated(), 0);
}

#[test]
fn test_free_with_wrong_tag_desynchronizes_without_wrapping() {
    let mut allocator = TaggedAllocator::new();
    let block = allocator.allocate(64, MemoryTag::Texture);

    allocator.free(block, MemoryTag::Material);

    // Total is right, per-tag figures drift (clamped at zero, never wrapped)
    assert_eq!(allocator.total_allocated(), 0);
    assert_eq!(allocator.tagged(MemoryTag::Texture), 64);
    assert_eq!(allocator.tagged(MemoryTag::Material), 0);
}

#[test]
fn test_shutdown_clears_statistics() {
    let mut allocator = TaggedAllocator::new();
    let _block = allocator.allocate(4096, MemoryTag::Application);

    allocator.shutdown();

    assert_eq!(allocator.stats(), &MemoryStats::default());
    assert_eq!(allocator.allocation_count(), 0);
}

// ============================================================================
// Report tests
// ============================================================================

#[test]
fn test_scale_bytes_picks_largest_fitting_unit() {
    assert_eq!(scale_bytes(0), (0.0, "B"));
    assert_eq!(scale_bytes(1023), (1023.0, "B"));
    assert_eq!(scale_bytes(1024), (1.0, "KiB"));
    assert_eq!(scale_bytes(1536), (1.5, "KiB"));
    assert_eq!(scale_bytes(3 * 1024 * 1024), (3.0, "MiB"));
    assert_eq!(scale_bytes(2 * 1024 * 1024 * 1024), (2.0, "GiB"));
}

#[test]
fn test_usage_report_lists_every_tag() {
    let mut allocator = TaggedAllocator::new();
    let _textures = allocator.allocate(2048, MemoryTag::Texture);
    let _materials = allocator.allocate(512, MemoryTag::Material);

    let report = allocator.usage_report();

    assert!(report.starts_with("System memory use (tagged):\n"));
    assert_eq!(report.lines().count(), 1 + MemoryTag::COUNT);
    assert!(report.contains("  TEXTURE    : 2.00KiB\n"));
    assert!(report.contains("  MATERIAL   : 512.00B\n"));
    assert!(report.contains("  SCENE      : 0.00B\n"));
}

// ============================================================================
// MemoryTag tests
// ============================================================================

#[test]
fn test_tag_indices_match_all_order() {
    for (position, tag) in MemoryTag::ALL.iter().enumerate() {
        assert_eq!(tag.index(), position);
    }
}

#[test]
fn test_tag_labels_share_one_width() {
    let width = MemoryTag::Unknown.label().len();
    assert!(MemoryTag::ALL.iter().all(|tag| tag.label().len() == width));
}
