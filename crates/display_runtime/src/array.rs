//! Fixed-length arrays with explicit bounds checking
//!
//! Every access goes through a range check before any element is touched. An
//! access outside `[0, len)` raises [`Fault::OutOfBounds`] carrying the
//! offending index and the array length, and leaves the array unmodified.
//! Indices are signed so that negative indices are representable and rejected
//! like any other out-of-range value.

use crate::fault::Fault;

/// A contiguous fixed-length sequence with checked element access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedArray<T> {
    items: Box<[T]>,
}

impl<T: Default + Clone> FixedArray<T> {
    /// Create an array of `length` default-initialized elements
    pub fn new(length: usize) -> Self {
        Self { items: vec![T::default(); length].into_boxed_slice() }
    }
}

impl<T> FixedArray<T> {
    /// Build an array from existing elements; the length is fixed thereafter
    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items: items.into_boxed_slice() }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has zero elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// View the elements as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Validate a single index against this array's bounds.
    ///
    /// Runs before any element is read or written; the returned fault carries
    /// the index exactly as supplied so the failing access is attributable.
    fn check(&self, index: i32) -> Result<usize, Fault> {
        let length = self.items.len();
        if index < 0 || index as usize >= length {
            return Err(Fault::OutOfBounds { index, length });
        }
        Ok(index as usize)
    }

    /// Borrow the element at `index`
    pub fn get(&self, index: i32) -> Result<&T, Fault> {
        let at = self.check(index)?;
        Ok(&self.items[at])
    }

    /// Write `value` at `index`.
    ///
    /// Out-of-range indices fail without mutating the array.
    pub fn store(&mut self, index: i32, value: T) -> Result<(), Fault> {
        let at = self.check(index)?;
        self.items[at] = value;
        Ok(())
    }
}

impl<T: Clone> FixedArray<T> {
    /// Read the element at `index`
    pub fn load(&self, index: i32) -> Result<T, Fault> {
        let at = self.check(index)?;
        Ok(self.items[at].clone())
    }

    /// Copy `length` elements within this array, from `src_offset` to
    /// `dst_offset`.
    ///
    /// Both ranges are validated in full before any element moves.
    /// Overlapping ranges copy back-to-front when the destination trails the
    /// source, so elements are never clobbered mid-copy.
    pub fn copy_within(
        &mut self,
        src_offset: i32,
        dst_offset: i32,
        length: i32,
    ) -> Result<(), Fault> {
        let len = self.items.len();
        let src = check_range(src_offset, length, len)?;
        let dst = check_range(dst_offset, length, len)?;
        let count = length as usize;

        if dst <= src {
            for n in 0..count {
                self.items[dst + n] = self.items[src + n].clone();
            }
        } else {
            for n in (0..count).rev() {
                self.items[dst + n] = self.items[src + n].clone();
            }
        }
        Ok(())
    }
}

/// Copy `length` elements from `src` starting at `src_offset` into `dst`
/// starting at `dst_offset`.
///
/// Both ranges are validated in full before any element moves; a negative
/// offset or length, or a range exceeding either array, raises
/// [`Fault::OutOfBounds`] and copies nothing.
pub fn copy<T: Clone>(
    src: &FixedArray<T>,
    src_offset: i32,
    dst: &mut FixedArray<T>,
    dst_offset: i32,
    length: i32,
) -> Result<(), Fault> {
    let from = check_range(src_offset, length, src.items.len())?;
    let to = check_range(dst_offset, length, dst.items.len())?;

    for n in 0..length as usize {
        dst.items[to + n] = src.items[from + n].clone();
    }
    Ok(())
}

/// Validate that `[offset, offset + count)` lies within an array of `length`
/// elements, returning the offset as a usable index.
///
/// The reported index is the first value that violates the bounds: the offset
/// itself when negative, the negative count, or the exclusive end of the range
/// when it overruns the array.
fn check_range(offset: i32, count: i32, length: usize) -> Result<usize, Fault> {
    if offset < 0 {
        return Err(Fault::OutOfBounds { index: offset, length });
    }
    if count < 0 {
        return Err(Fault::OutOfBounds { index: count, length });
    }
    let end = i64::from(offset) + i64::from(count);
    if end > length as i64 {
        return Err(Fault::OutOfBounds { index: offset.saturating_add(count), length });
    }
    Ok(offset as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultKind;

    #[test]
    fn in_range_store_and_load() {
        let mut values = FixedArray::<i32>::new(4);
        values.store(2, 7).unwrap();
        assert_eq!(values.load(2).unwrap(), 7);
        assert_eq!(values.load(0).unwrap(), 0);
        assert_eq!(values.as_slice(), &[0, 0, 7, 0]);
    }

    #[test]
    fn out_of_range_store_reports_index_and_length() {
        // The original regression: a length-1 array written at index 10.
        let mut values = FixedArray::<i32>::new(1);
        let fault = values.store(10, 1).unwrap_err();
        assert_eq!(fault, Fault::OutOfBounds { index: 10, length: 1 });
        // No mutation happened.
        assert_eq!(values.as_slice(), &[0]);
    }

    #[test]
    fn negative_index_rejected() {
        let values = FixedArray::<u8>::from_vec(vec![1, 2, 3]);
        let fault = values.load(-1).unwrap_err();
        assert_eq!(fault, Fault::OutOfBounds { index: -1, length: 3 });
    }

    #[test]
    fn empty_array_rejects_everything() {
        let values = FixedArray::<i32>::new(0);
        assert!(values.load(0).is_err());
        assert!(values.is_empty());
    }

    #[test]
    fn fault_passes_through_unrelated_handler() {
        // Regression coverage for the historical fall-through defect: a
        // handler for an unrelated kind sits between the access and the
        // matching handler, and must never fire.
        fn store_through_decode_handler(values: &mut FixedArray<i32>) -> Result<(), Fault> {
            let result = values.store(10, 1);
            match result {
                Err(fault) if fault.is(FaultKind::Decode) => {
                    unreachable!("decode handler must not intercept a bounds fault")
                }
                other => other,
            }
        }

        let mut values = FixedArray::<i32>::new(1);
        let fault = store_through_decode_handler(&mut values).unwrap_err();
        assert_eq!(fault.kind(), FaultKind::OutOfBounds);
        assert_eq!(fault, Fault::OutOfBounds { index: 10, length: 1 });
    }

    #[test]
    fn copy_between_arrays() {
        let src = FixedArray::from_vec(vec![1, 2, 3, 4]);
        let mut dst = FixedArray::<i32>::new(4);
        copy(&src, 1, &mut dst, 0, 3).unwrap();
        assert_eq!(dst.as_slice(), &[2, 3, 4, 0]);
    }

    #[test]
    fn copy_validates_before_moving_anything() {
        let src = FixedArray::from_vec(vec![1, 2, 3]);
        let mut dst = FixedArray::<i32>::new(2);

        // Range exceeds the destination; nothing may be written.
        let fault = copy(&src, 0, &mut dst, 0, 3).unwrap_err();
        assert_eq!(fault, Fault::OutOfBounds { index: 3, length: 2 });
        assert_eq!(dst.as_slice(), &[0, 0]);

        // Negative length.
        let fault = copy(&src, 0, &mut dst, 0, -1).unwrap_err();
        assert_eq!(fault.kind(), FaultKind::OutOfBounds);

        // Negative source offset.
        let fault = copy(&src, -2, &mut dst, 0, 1).unwrap_err();
        assert_eq!(fault, Fault::OutOfBounds { index: -2, length: 3 });
    }

    #[test]
    fn overlapping_copy_within_preserves_elements() {
        let mut values = FixedArray::from_vec(vec![1, 2, 3, 4, 5]);
        // Shift right by one; destination trails source, so the copy runs
        // back-to-front.
        values.copy_within(0, 1, 4).unwrap();
        assert_eq!(values.as_slice(), &[1, 1, 2, 3, 4]);

        let mut values = FixedArray::from_vec(vec![1, 2, 3, 4, 5]);
        values.copy_within(1, 0, 4).unwrap();
        assert_eq!(values.as_slice(), &[2, 3, 4, 5, 5]);
    }
}
