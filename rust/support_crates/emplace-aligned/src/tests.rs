use std::mem::{align_of, size_of};

use bytemuck::{Pod, Zeroable};
use emplace_common::ErrorKind;
use emplace_testkit::{DropCounter, Tracked, data_gen};

use crate::{Align, Aligned, Alignment};

#[allow(dead_code)]
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
struct Vec4 {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

#[allow(dead_code)]
#[repr(C, align(64))]
#[derive(Clone, Copy)]
struct CacheLine([u8; 64]);

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
struct Point {
    x: u32,
    y: u32,
}

fn check_len<T>() {
    let storage = Aligned::<T>::new();
    assert_eq!(Aligned::<T>::LEN, size_of::<T>());
    assert_eq!(storage.as_bytes().len(), size_of::<T>());
    assert_eq!(size_of::<Aligned<T>>(), size_of::<T>());
    assert_eq!(align_of::<Aligned<T>>(), align_of::<T>());
    assert_eq!(Aligned::<T>::SIZE, size_of::<Aligned<T>>());
}

#[test]
fn test_len_matches_hosted_type() {
    check_len::<u8>();
    check_len::<u16>();
    check_len::<u32>();
    check_len::<u64>();
    check_len::<u128>();
    check_len::<[u8; 3]>();
    check_len::<(u8, u32)>();
    check_len::<String>();
    check_len::<Vec4>();
    check_len::<CacheLine>();
    check_len::<()>();
}

#[test]
fn test_stricter_alignment_pads_object_not_buffer() {
    type Storage = Aligned<u32, Align<32>>;
    let storage = Storage::new();
    assert_eq!(Storage::LEN, 4);
    assert_eq!(Storage::ALIGN, 32);
    assert_eq!(Storage::SIZE, 32);
    assert_eq!(size_of::<Storage>(), 32);
    assert_eq!(align_of::<Storage>(), 32);
    assert_eq!(storage.as_bytes().len(), 4);
}

#[test]
fn test_weaker_request_keeps_natural_alignment() {
    type Storage = Aligned<Vec4, Align<4>>;
    assert_eq!(Storage::ALIGN, 16);
    assert_eq!(align_of::<Storage>(), 16);
    assert_eq!(size_of::<Storage>(), size_of::<Vec4>());

    assert_eq!(Aligned::<u64>::ALIGN, align_of::<u64>());
    assert_eq!(Aligned::<u64, Align<1>>::ALIGN, align_of::<u64>());
    assert_eq!(Aligned::<u64, Align<2>>::ALIGN, align_of::<u64>());
    assert_eq!(align_of::<Aligned<u64, Align<1>>>(), align_of::<u64>());
}

fn check_alignment<T, A: Alignment>() {
    let mut storage = Aligned::<T, A>::new();
    assert!(storage.is_aligned_to(A::VALUE));
    assert!(storage.is_aligned_to(align_of::<T>()));
    assert_eq!(storage.as_mut_ptr().addr() % A::VALUE, 0);

    let boxed = Box::new(Aligned::<T, A>::new());
    assert!(boxed.is_aligned_to(A::VALUE));

    let many: Vec<Aligned<T, A>> = (0..7).map(|_| Aligned::new()).collect();
    for storage in &many {
        assert!(storage.is_aligned_to(A::VALUE));
        assert!(storage.is_aligned_to(Aligned::<T, A>::ALIGN));
    }
}

macro_rules! check_alignments {
    ($($ty:ty),* $(,)?) => { $(
        check_alignment::<$ty, Align<1>>();
        check_alignment::<$ty, Align<2>>();
        check_alignment::<$ty, Align<4>>();
        check_alignment::<$ty, Align<8>>();
        check_alignment::<$ty, Align<16>>();
        check_alignment::<$ty, Align<32>>();
        check_alignment::<$ty, Align<64>>();
    )* };
}

#[test]
fn test_pointer_is_aligned_for_every_request() {
    check_alignments!(u8, u16, u32, u64, u128, [u8; 5], Vec4, CacheLine, Point);
}

#[test]
fn test_page_alignment() {
    let storage = Box::new(Aligned::<u64, Align<4096>>::new());
    assert!(storage.is_aligned_to(4096));
}

#[test]
fn test_const_and_mut_pointers_share_address() {
    let mut storage = Aligned::<u64, Align<16>>::new();
    let const_addr = storage.as_ptr().addr();
    let mut_addr = storage.as_mut_ptr().addr();
    assert_eq!(const_addr, mut_addr);
    assert_eq!(const_addr, storage.addr());
}

#[test]
fn test_mutable_reference_is_visible_through_pointer() {
    let mut storage = Aligned::<u64>::new();
    storage.write(1);
    unsafe {
        *storage.assume_init_mut() = 7;
        assert_eq!(storage.as_ptr().read(), 7);
        assert_eq!(storage.assume_init_ref() as *const u64, storage.as_ptr());
    }
}

#[test]
fn test_round_trip_42() {
    let mut storage = Aligned::<i32>::new();
    unsafe {
        storage.as_mut_ptr().write(42);
        assert_eq!(storage.as_ptr().read(), 42);
        assert_eq!(*storage.assume_init_ref(), 42);
        assert_eq!(*storage.assume_init_mut(), 42);
    }
}

#[test]
fn test_round_trip_with_stricter_alignment() {
    let mut slots: [Aligned<u32, Align<32>>; 8] = std::array::from_fn(|_| Aligned::new());
    for (i, slot) in slots.iter_mut().enumerate() {
        assert!(slot.is_aligned_to(32));
        slot.write(i as u32 * 1000 + 42);
    }
    for (i, slot) in slots.iter().enumerate() {
        assert_eq!(unsafe { *slot.assume_init_ref() }, i as u32 * 1000 + 42);
    }
    for pair in slots.windows(2) {
        assert_eq!(pair[1].addr() - pair[0].addr(), 32);
    }
}

#[test]
fn test_aggregate_round_trip() {
    let mut storage = Aligned::<Vec4, Align<64>>::new();
    let v = Vec4 {
        x: 1.0,
        y: -2.5,
        z: 3.25,
        w: 0.0,
    };
    storage.write(v);
    assert!(storage.is_aligned_to(64));
    assert_eq!(unsafe { *storage.assume_init_ref() }, v);
}

#[test]
fn test_distinct_instances_have_distinct_addresses() {
    let a = Aligned::<u8>::new();
    let b = Aligned::<u8>::new();
    assert_ne!(a.addr(), b.addr());

    let many: Vec<Aligned<u64, Align<8>>> = (0..64).map(|_| Aligned::new()).collect();
    let mut addrs: Vec<usize> = many.iter().map(Aligned::addr).collect();
    addrs.sort_unstable();
    addrs.dedup();
    assert_eq!(addrs.len(), many.len());
}

#[test]
fn test_byte_copy_does_not_clone_hosted_value() {
    let counter = DropCounter::new();
    let mut a = Aligned::<Tracked<String>>::new();
    let mut b = Aligned::<Tracked<String>>::new();
    a.write(counter.track(String::from("hosted")));

    b.copy_bytes_from(&a);
    assert_eq!(counter.clones(), 0);
    assert_eq!(counter.drops(), 0);
    assert_eq!(**unsafe { b.assume_init_ref() }, "hosted");

    // Both buffers now alias the same heap string; only one may drop it.
    unsafe { a.assume_init_drop() };
    assert_eq!(counter.drops(), 1);
    assert_eq!(counter.clones(), 0);
}

#[test]
fn test_byte_copy_matches_source_bytes() {
    let mut a = Aligned::<Point>::new();
    let mut b = Aligned::<Point>::zeroed();
    let p = Point {
        x: 0xdead_beef,
        y: 7,
    };
    a.write(p);
    b.copy_bytes_from(&a);

    let mut out = [0u8; 8];
    unsafe { b.copy_to_slice(&mut out) }.unwrap();
    assert_eq!(&out, bytemuck::bytes_of(&p));
    assert_eq!(unsafe { *b.assume_init_ref() }, p);
}

#[test]
fn test_dropping_storage_does_not_drop_value() {
    let counter = DropCounter::new();
    {
        let mut storage = Aligned::<Tracked<u32>>::new();
        storage.write(counter.track(5));
    }
    assert_eq!(counter.drops(), 0);
}

#[test]
fn test_assume_init_drop_runs_destructor_once() {
    let counter = DropCounter::new();
    let mut storage = Aligned::<Tracked<u32>>::new();
    storage.write(counter.track(5));
    unsafe { storage.assume_init_drop() };
    assert_eq!(counter.drops(), 1);

    storage.write(counter.track(6));
    assert_eq!(**unsafe { storage.assume_init_ref() }, 6);
    unsafe { storage.assume_init_drop() };
    assert_eq!(counter.drops(), 2);
}

#[test]
fn test_write_overwrites_without_drop() {
    let counter = DropCounter::new();
    let mut storage = Aligned::<Tracked<u32>>::new();
    storage.write(counter.track(1));
    let second = storage.write(counter.track(2));
    assert_eq!(**second, 2);
    assert_eq!(counter.drops(), 0);

    let value = unsafe { storage.assume_init_read() };
    assert_eq!(*value, 2);
    drop(value);
    assert_eq!(counter.drops(), 1);
}

#[test]
fn test_copy_from_slice() {
    let mut storage = Aligned::<u32, Align<16>>::new();
    storage
        .copy_from_slice(&0x0102_0304u32.to_ne_bytes())
        .unwrap();
    assert_eq!(unsafe { *storage.assume_init_ref() }, 0x0102_0304);

    let err = storage.copy_from_slice(&[1, 2, 3]).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    assert_eq!(unsafe { *storage.assume_init_ref() }, 0x0102_0304);
}

#[test]
fn test_copy_from_random_bytes() {
    fastrand::seed(98123);
    for _ in 0..100 {
        let bytes = data_gen::random_bytes(size_of::<Point>());
        let mut storage = Aligned::<Point>::new();
        storage.copy_from_slice(&bytes).unwrap();
        let expected: Point = bytemuck::pod_read_unaligned(&bytes);
        assert_eq!(unsafe { *storage.assume_init_ref() }, expected);
    }
}

#[test]
fn test_copy_to_slice_dest_too_small() {
    let storage = Aligned::<u64>::zeroed();
    let mut small = [0u8; 7];
    let err = unsafe { storage.copy_to_slice(&mut small) }.unwrap_err();
    match err.into_kind() {
        ErrorKind::DestBufferTooSmall { required, actual } => {
            assert_eq!(required, 8);
            assert_eq!(actual, 7);
        }
        kind => panic!("unexpected kind {kind:?}"),
    }

    let mut large = [0xffu8; 12];
    unsafe { storage.copy_to_slice(&mut large) }.unwrap();
    assert_eq!(&large[..8], &[0u8; 8]);
    assert_eq!(&large[8..], &[0xffu8; 4]);
}

#[test]
fn test_zeroed() {
    let storage = Aligned::<[u64; 4], Align<32>>::zeroed();
    assert_eq!(unsafe { *storage.assume_init_ref() }, [0u64; 4]);
}

#[test]
fn test_zero_sized_hosted_type() {
    let mut storage = Aligned::<(), Align<8>>::new();
    assert_eq!(Aligned::<(), Align<8>>::LEN, 0);
    assert!(storage.as_bytes().is_empty());
    assert!(storage.is_aligned_to(8));
    storage.write(());
    storage.copy_from_slice(&[]).unwrap();
}

static SHARED: Aligned<u64, Align<64>> = Aligned::new();

#[test]
fn test_const_construction() {
    assert!(SHARED.is_aligned_to(64));
    const ZEROED: Aligned<u32> = Aligned::zeroed();
    assert_eq!(unsafe { *ZEROED.assume_init_ref() }, 0);
}

#[test]
fn test_move_to_thread() {
    let mut storage = Aligned::<u64>::new();
    let value = data_gen::random_u64();
    storage.write(value);
    let handle = std::thread::spawn(move || unsafe { *storage.assume_init_ref() });
    assert_eq!(handle.join().unwrap(), value);
}

#[test]
fn test_debug_does_not_read_content() {
    let storage = Aligned::<u32, Align<8>>::new();
    let text = format!("{storage:?}");
    assert!(text.starts_with("Aligned { len: 4, align: 8, addr: 0x"));
}
