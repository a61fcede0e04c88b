use core::{
    alloc::Layout,
    convert::Infallible,
    fmt::{self, Debug, Display, Formatter},
    marker::PhantomData,
    mem,
    ops::{Index, IndexMut},
    ptr::NonNull,
    slice,
};

use std::alloc::handle_alloc_error;

use panf_log::{debug, error, trace};

use crate::{
    allocator::Allocator,
    capacity_policy::{CapacityPolicy, Linear},
    errors::ArrayError,
    global_alloc::GLOBAL_ALLOC,
    Result,
};

use super::{sort, strategies};

use ArrayError::{AllocFailed, CapacityOverflow, Incomparable, IndexOutOfRange, InvalidCapacity};

/// A growable, indexable sequence backed by one contiguous buffer.
///
/// Elements live in slots `[0, len)`; slots `[len, capacity)` are
/// uninitialised and never hold a stale value. The buffer grows only when an
/// insertion finds it full, by the rule of `Policy` (by default [`Linear`]:
/// `len + 10` slots), and shrinks only through [`trim_to_size`] or
/// [`reset`].
///
/// The array carries no synchronisation. It is `Send`/`Sync` when `T` is, so
/// it can be moved to another thread or shared behind a lock.
///
/// [`trim_to_size`]: DynamicArray::trim_to_size
/// [`reset`]: DynamicArray::reset
pub struct DynamicArray<T, Policy = Linear>
    where
        Policy: CapacityPolicy,
{
    data: NonNull<T>,
    capacity: usize,
    len: usize,
    _markers: PhantomData<(T, Policy)>,
}

const_assert!(size_of!(DynamicArray<u32>) == size_of!(Option<DynamicArray<u32>>));

unsafe impl<T: Send, Policy: CapacityPolicy> Send for DynamicArray<T, Policy> {}

unsafe impl<T: Sync, Policy: CapacityPolicy> Sync for DynamicArray<T, Policy> {}

fn try_allocate<T>(capacity: usize) -> Result<NonNull<T>> {
    if Layout::array::<T>(capacity).is_err() {
        return Err(CapacityOverflow { requested: capacity })
    }
    unsafe { GLOBAL_ALLOC.allocate_uninit(capacity) }
        .ok_or(AllocFailed { new_capacity: capacity })
}

#[cold]
fn reserve_failed<T>(err: ArrayError) -> ! {
    error!("{}", err);
    if let AllocFailed { new_capacity } = err {
        if let Ok(layout) = Layout::array::<T>(new_capacity) {
            handle_alloc_error(layout)
        }
    }
    panic!("{}", err)
}

impl<T> DynamicArray<T> {

    /// Creates an empty array with [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) slots.
    pub fn new() -> Self {
        Self::with_policy()
    }

    /// Creates an empty array with exactly `capacity` slots. Zero allocates
    /// nothing.
    ///
    /// Fails with [`ArrayError::InvalidCapacity`] when `capacity` slots of `T`
    /// exceed the largest possible allocation.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_and_policy(capacity)
    }
}

impl<T, Policy> DynamicArray<T, Policy>
    where
        Policy: CapacityPolicy,
{

    pub fn with_policy() -> Self {
        let capacity = Policy::DEFAULT_CAPACITY;
        let data = try_allocate(capacity).unwrap_or_else(|err| reserve_failed::<T>(err));
        Self {
            data,
            capacity,
            len: 0,
            _markers: PhantomData,
        }
    }

    pub fn with_capacity_and_policy(capacity: usize) -> Result<Self> {
        let data = match try_allocate(capacity) {
            Ok(data) => data,
            Err(CapacityOverflow { .. }) => {
                debug!("rejected illegal capacity {}", capacity);
                return Err(InvalidCapacity { capacity })
            },
            Err(err) => return Err(err),
        };
        Ok(Self {
            data,
            capacity,
            len: 0,
            _markers: PhantomData,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(new_capacity >= self.len);
        let data = try_allocate::<T>(new_capacity)?;
        unsafe {
            strategies::move_elements(self.data, data, self.len);
            GLOBAL_ALLOC.free_uninit(self.data, self.capacity);
        }
        trace!("reallocated backing store from {} to {} slots", self.capacity, new_capacity);
        self.data = data;
        self.capacity = new_capacity;
        Ok(())
    }

    fn grow_to(&mut self, required: usize) -> Result<()> {
        if required <= self.capacity {
            return Ok(())
        }
        let new_capacity = Policy::grow(self.capacity, self.len, required)
            .ok_or(CapacityOverflow { requested: required })?;
        self.reallocate(new_capacity)
    }

    fn grow_one(&mut self) {
        let res = match self.len.checked_add(1) {
            Some(required) => self.grow_to(required),
            None => Err(CapacityOverflow { requested: usize::MAX }),
        };
        if let Err(err) = res {
            reserve_failed::<T>(err)
        }
    }

    /// Makes room for at least `additional` more elements, growing by the
    /// array's policy.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let required = self.len
            .checked_add(additional)
            .ok_or(CapacityOverflow { requested: usize::MAX })?;
        self.grow_to(required)
    }

    #[inline(always)]
    fn push(&mut self, value: T) -> &mut T {
        if self.len >= self.capacity {
            self.grow_one();
        }
        unsafe {
            let mut ptr = self.data.add(self.len);
            ptr.write(value);
            self.len += 1;
            ptr.as_mut()
        }
    }

    /// Appends `value` after the last element, growing the buffer if it is
    /// full. Always returns `true`.
    pub fn append(&mut self, value: T) -> bool {
        self.push(value);
        true
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None
        }
        self.len -= 1;
        Some(unsafe { self.data.add(self.len).read() })
    }

    #[inline(always)]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(IndexOutOfRange { index, len })
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, value))
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot right.
    /// `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T> {
        if index > self.len {
            return Err(IndexOutOfRange { index, len: self.len })
        }
        if self.len >= self.capacity {
            self.grow_one();
        }
        unsafe {
            let mut ptr = strategies::insert_element(self.data, value, index, self.len);
            self.len += 1;
            Ok(ptr.as_mut())
        }
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(IndexOutOfRange { index, len: self.len })
        }
        let removed = unsafe { strategies::remove_element(self.data, index, self.len) };
        self.len -= 1;
        Ok(removed)
    }

    /// Removes the first element equal to `value`. Returns `false` and leaves
    /// the array untouched if there is none.
    pub fn remove_value(&mut self, value: &T) -> bool
        where
            T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }

    pub fn index_of(&self, value: &T) -> Option<usize>
        where
            T: PartialEq,
    {
        self.iter().position(|item| item == value)
    }

    pub fn contains(&self, value: &T) -> bool
        where
            T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Drops every element. The capacity is kept.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe {
            strategies::drop_in_place(self.data, len);
        }
    }

    /// Drops every element and releases the buffer, leaving capacity 0.
    pub fn reset(&mut self) {
        self.clear();
        unsafe {
            GLOBAL_ALLOC.free_uninit(self.data, self.capacity);
        }
        trace!("released backing store of {} slots", self.capacity);
        self.data = NonNull::dangling();
        self.capacity = 0;
    }

    /// Shrinks the capacity to exactly `len`. An empty array releases its
    /// buffer.
    pub fn trim_to_size(&mut self) {
        if self.len >= self.capacity {
            return
        }
        if let Err(err) = self.reallocate(self.len) {
            reserve_failed::<T>(err)
        }
    }

    /// Sorts the elements by their natural order with an in-place quicksort.
    ///
    /// The sort is not stable: equal elements may change relative order.
    pub fn sort(&mut self)
        where
            T: Ord,
    {
        let Ok(()) = sort::quick_sort(
            self.as_mut_slice(),
            |left: &T, right: &T| Ok::<_, Infallible>(left.cmp(right)),
        );
    }

    /// Sorts elements that are only partially ordered.
    ///
    /// Fails with [`ArrayError::Incomparable`], naming the positions of the
    /// two elements, as soon as a comparison has no answer (a `NaN`, for
    /// instance). The array keeps its original order on failure.
    pub fn try_sort(&mut self) -> Result<()>
        where
            T: PartialOrd,
    {
        let mut order = DynamicArray::<usize>::with_capacity(self.len)?;
        order.extend(0..self.len);
        let items = self.as_slice();
        sort::quick_sort(order.as_mut_slice(), |&left: &usize, &right: &usize| {
            items[left]
                .partial_cmp(&items[right])
                .ok_or(Incomparable { left, right })
        })?;
        sort::apply_permutation(self.as_mut_slice(), order.as_mut_slice());
        Ok(())
    }
}

impl<T, Policy: CapacityPolicy> Drop for DynamicArray<T, Policy> {

    fn drop(&mut self) {
        unsafe {
            strategies::drop_in_place(self.data, self.len);
            GLOBAL_ALLOC.free_uninit(self.data, self.capacity);
        }
    }
}

impl<T> Default for DynamicArray<T> {

    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, Policy: CapacityPolicy> Clone for DynamicArray<T, Policy> {

    fn clone(&self) -> Self {
        let data = try_allocate(self.len).unwrap_or_else(|err| reserve_failed::<T>(err));
        let mut clone = Self {
            data,
            capacity: self.len,
            len: 0,
            _markers: PhantomData,
        };
        clone.extend(self.iter().cloned());
        clone
    }
}

impl<T, Policy: CapacityPolicy> Extend<T> for DynamicArray<T, Policy> {

    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        if let Err(err) = self.reserve(iter.size_hint().0) {
            reserve_failed::<T>(err)
        }
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, Policy: CapacityPolicy> FromIterator<T> for DynamicArray<T, Policy> {

    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::with_policy();
        array.extend(iter);
        array
    }
}

impl<T: Display, Policy: CapacityPolicy> Display for DynamicArray<T, Policy> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

impl<T: Debug, Policy: CapacityPolicy> Debug for DynamicArray<T, Policy> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U, P, Q> PartialEq<DynamicArray<U, Q>> for DynamicArray<T, P>
    where
        T: PartialEq<U>,
        P: CapacityPolicy,
        Q: CapacityPolicy,
{

    fn eq(&self, other: &DynamicArray<U, Q>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, Policy: CapacityPolicy> Eq for DynamicArray<T, Policy> {}

impl<T, U, Policy> PartialEq<[U]> for DynamicArray<T, Policy>
    where
        T: PartialEq<U>,
        Policy: CapacityPolicy,
{

    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, Policy, const N: usize> PartialEq<[U; N]> for DynamicArray<T, Policy>
    where
        T: PartialEq<U>,
        Policy: CapacityPolicy,
{

    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, Policy: CapacityPolicy> Index<usize> for DynamicArray<T, Policy> {

    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.data.add(index).as_ref() }
    }
}

impl<T, Policy: CapacityPolicy> IndexMut<usize> for DynamicArray<T, Policy> {

    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.data.add(index).as_mut() }
    }
}

impl<T, Policy: CapacityPolicy> AsRef<[T]> for DynamicArray<T, Policy> {

    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, Policy: CapacityPolicy> AsMut<[T]> for DynamicArray<T, Policy> {

    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T, Policy: CapacityPolicy> IntoIterator for &'a DynamicArray<T, Policy> {

    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, Policy: CapacityPolicy> IntoIterator for &'a mut DynamicArray<T, Policy> {

    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
