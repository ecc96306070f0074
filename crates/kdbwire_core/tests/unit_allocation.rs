use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use kdbwire::ipc::{DecodeOptions, Endianness, IpcError, decode_value};

struct CountingAllocator;

static BYTES_ALLOCATED: AtomicUsize = AtomicUsize::new(0);
static LARGEST_ALLOCATION: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for CountingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		BYTES_ALLOCATED.fetch_add(layout.size(), Ordering::SeqCst);
		LARGEST_ALLOCATION.fetch_max(layout.size(), Ordering::SeqCst);
		unsafe { System.alloc(layout) }
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		unsafe { System.dealloc(ptr, layout) }
	}
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn reset_allocation_tracking() {
	BYTES_ALLOCATED.store(0, Ordering::SeqCst);
	LARGEST_ALLOCATION.store(0, Ordering::SeqCst);
}

/// `levels` list headers claiming `u32::MAX` children each, then `padding` bytes of `tag`.
fn huge_claims(levels: usize, tag: u8, padding: usize) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(levels * 6 + padding);
	for _ in 0..levels {
		bytes.extend_from_slice(&[0, 0, 0xff, 0xff, 0xff, 0xff]);
	}
	bytes.resize(levels * 6 + padding, tag);
	bytes
}

// Both cases share the global counters, so they run inside one test.
#[test]
fn oversized_length_claims_do_not_reserve_input_sized_buffers() {
	let lists = huge_claims(100, 0xfd, 1 << 20);
	reset_allocation_tracking();
	let err = decode_value(&lists, Endianness::Little, &DecodeOptions::default()).expect_err("atom tag -3 is unassigned");
	assert!(matches!(err, IpcError::UnknownType { code: -3, at: 600 }));
	let total = BYTES_ALLOCATED.load(Ordering::SeqCst);
	let largest = LARGEST_ALLOCATION.load(Ordering::SeqCst);
	assert!(total < 16 << 20, "nested lists allocated {total} bytes from a 1 MiB input");
	assert!(largest < 256 << 10, "largest single allocation was {largest} bytes");

	let mut symbols = vec![11, 0, 0xff, 0xff, 0xff, 0xff];
	symbols.resize(6 + (1 << 20), b'a');
	reset_allocation_tracking();
	let err = decode_value(&symbols, Endianness::Little, &DecodeOptions::default()).expect_err("unterminated symbol");
	assert!(matches!(err, IpcError::TruncatedInput { .. }));
	let largest = LARGEST_ALLOCATION.load(Ordering::SeqCst);
	assert!(largest < 2 << 20, "largest single allocation was {largest} bytes");
}
