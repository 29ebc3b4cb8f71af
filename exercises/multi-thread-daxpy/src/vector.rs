//! Cache-line aligned `f64` vectors.
//!
//! `Vec<f64>` only guarantees 8-byte alignment, so the buffers are allocated
//! directly through the global allocator with an explicit [`Layout`] and
//! released with the same layout on drop.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::slice;

use log::debug;

use crate::config::CACHE_LINE_SIZE;
use crate::error::{Error, Result};

/// An owned, fixed-length `f64` buffer aligned to [`CACHE_LINE_SIZE`].
pub struct AlignedBuffer {
    ptr: NonNull<f64>,
    len: usize,
    layout: Layout,
}

impl AlignedBuffer {
    /// Allocate `len` zeroed elements.
    ///
    /// Returns [`Error::Allocation`] when the byte size overflows, the layout
    /// is invalid or the allocator has no memory to give.
    pub fn zeroed(len: usize) -> Result<Self> {
        let size = len
            .checked_mul(mem::size_of::<f64>())
            .ok_or_else(|| Error::allocation(usize::MAX, CACHE_LINE_SIZE, "size overflow"))?;
        let layout = Layout::from_size_align(size, CACHE_LINE_SIZE)
            .map_err(|e| Error::allocation(size, CACHE_LINE_SIZE, e.to_string()))?;

        if size == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len: 0,
                layout,
            });
        }

        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc_zeroed(layout) } as *mut f64;
        let ptr = NonNull::new(raw)
            .ok_or_else(|| Error::allocation(size, CACHE_LINE_SIZE, "out of memory"))?;

        Ok(Self { ptr, len, layout })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Alignment of the underlying allocation in bytes
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }
}

impl Deref for AlignedBuffer {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        // SAFETY: `ptr` is valid for `len` initialized (zeroed) elements, or
        // dangling with `len == 0`.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for AlignedBuffer {
    fn deref_mut(&mut self) -> &mut [f64] {
        // SAFETY: as in `deref`, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            // SAFETY: allocated in `zeroed` with exactly this layout.
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, self.layout) }
        }
    }
}

// SAFETY: the buffer uniquely owns its allocation, like a `Vec<f64>`.
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}

impl fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// The three DAXPY operands: inputs `a`, `b` and output `c`.
#[derive(Debug)]
pub struct VectorTriple {
    /// First input, `a[i] = i * 0.1`
    pub a: AlignedBuffer,
    /// Second input, `b[i] = i * 0.2`
    pub b: AlignedBuffer,
    /// Output, zero until the workers run
    pub c: AlignedBuffer,
}

impl VectorTriple {
    /// Allocate and initialize three vectors of `len` elements.
    pub fn allocate(len: usize) -> Result<Self> {
        let mut a = AlignedBuffer::zeroed(len)?;
        let mut b = AlignedBuffer::zeroed(len)?;
        let mut c = AlignedBuffer::zeroed(len)?;

        let elements = a.iter_mut().zip(b.iter_mut()).zip(c.iter_mut());
        for (i, ((ai, bi), ci)) in elements.enumerate() {
            let x = i as f64;
            *ai = x * 0.1;
            *bi = x * 0.2;
            *ci = 0.0;
        }

        debug!("allocated 3 x {len} doubles ({CACHE_LINE_SIZE}-byte aligned)");
        Ok(Self { a, b, c })
    }

    /// Number of elements in each vector
    pub fn len(&self) -> usize {
        self.c.len()
    }

    /// Whether the vectors are empty
    pub fn is_empty(&self) -> bool {
        self.c.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(1024)]
    fn test_buffers_are_cache_line_aligned(#[case] len: usize) {
        let triple = VectorTriple::allocate(len).unwrap();
        for buf in [&triple.a, &triple.b, &triple.c] {
            assert_eq!(buf.len(), len);
            assert_eq!(buf.alignment(), CACHE_LINE_SIZE);
            assert_eq!(buf.as_ptr() as usize % CACHE_LINE_SIZE, 0);
        }
    }

    #[test]
    fn test_initial_values() {
        let triple = VectorTriple::allocate(4).unwrap();
        assert_eq!(&triple.a[..], &[0.0, 0.1, 0.2, 0.1 * 3.0]);
        assert_eq!(&triple.b[..], &[0.0, 0.2, 0.4, 0.2 * 3.0]);
        assert_eq!(&triple.c[..], &[0.0; 4]);
    }

    #[test]
    fn test_empty_buffer() {
        let buf = AlignedBuffer::zeroed(0).unwrap();
        assert!(buf.is_empty());
        assert!(buf.iter().next().is_none());
    }

    #[test]
    fn test_size_overflow_is_an_allocation_error() {
        match AlignedBuffer::zeroed(usize::MAX) {
            Err(Error::Allocation { alignment, .. }) => assert_eq!(alignment, CACHE_LINE_SIZE),
            other => panic!("expected allocation error, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_layout_is_an_allocation_error() {
        // Fits in usize but exceeds isize::MAX once rounded to the alignment
        let len = isize::MAX as usize / mem::size_of::<f64>();
        assert!(matches!(
            AlignedBuffer::zeroed(len),
            Err(Error::Allocation { .. })
        ));
    }

    #[test]
    fn test_buffer_is_writable() {
        let mut buf = AlignedBuffer::zeroed(3).unwrap();
        buf[1] = 42.0;
        assert_eq!(&buf[..], &[0.0, 42.0, 0.0]);
    }
}
