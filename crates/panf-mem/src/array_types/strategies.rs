use core::ptr::{self, NonNull};

/// Moves `len` elements bitwise from `src` to `dst`. The source slots are
/// logically uninitialised afterwards.
#[inline(always)]
pub(super) unsafe fn move_elements<T>(src: NonNull<T>, dst: NonNull<T>, len: usize) {
    unsafe {
        src.copy_to_nonoverlapping(dst, len);
    }
}

/// Shifts `[index, len)` one slot right, highest index first, then writes
/// `value` into the opened slot. Slot `len` must be allocated.
#[inline(always)]
pub(super) unsafe fn insert_element<T>(ptr: NonNull<T>, value: T, index: usize, len: usize) -> NonNull<T> {
    unsafe {
        for i in (index + 1..=len).rev() {
            ptr.add(i).write(ptr.add(i - 1).read());
        }
        let res = ptr.add(index);
        res.write(value);
        res
    }
}

/// Moves the value at `index` out and shifts `(index, len)` one slot left.
/// Slot `len - 1` is uninitialised afterwards.
#[inline(always)]
pub(super) unsafe fn remove_element<T>(ptr: NonNull<T>, index: usize, len: usize) -> T {
    unsafe {
        let removed = ptr.add(index).read();
        for i in index + 1..len {
            ptr.add(i - 1).write(ptr.add(i).read());
        }
        removed
    }
}

#[inline(always)]
pub(super) unsafe fn drop_in_place<T>(ptr: NonNull<T>, len: usize) {
    unsafe {
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), len));
    }
}
