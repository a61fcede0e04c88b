use core::{
    alloc::Layout,
    ptr::NonNull,
};

pub trait Allocator {

    unsafe fn allocate_raw(&self, layout: Layout) -> Option<NonNull<u8>>;

    unsafe fn free_raw(&self, ptr: NonNull<u8>, layout: Layout);

    /// Returns `None` if `count` slots of `T` do not fit a [`Layout`] or the
    /// allocator is out of memory. Zero-sized requests never reach the
    /// allocator and get a dangling, well-aligned pointer.
    unsafe fn allocate_uninit<T>(&self, count: usize) -> Option<NonNull<T>> {
        let layout = Layout::array::<T>(count).ok()?;
        if layout.size() == 0 {
            return Some(NonNull::dangling())
        }
        unsafe { self.allocate_raw(layout).map(NonNull::cast) }
    }

    unsafe fn free_uninit<T>(&self, ptr: NonNull<T>, count: usize) {
        let Ok(layout) = Layout::array::<T>(count) else {
            return
        };
        if layout.size() == 0 {
            return
        }
        unsafe { self.free_raw(ptr.cast(), layout) }
    }
}
