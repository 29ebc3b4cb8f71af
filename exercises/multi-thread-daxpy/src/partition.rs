//! Splitting the index range across workers.

use std::ops::Range;

/// The contiguous index range handed to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkAssignment {
    /// Worker index, also the CPU it is pinned to
    pub worker_id: usize,
    /// First global index (inclusive)
    pub start: usize,
    /// Last global index (exclusive)
    pub end: usize,
}

impl WorkAssignment {
    /// Global index range
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of elements assigned
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the worker has nothing to do
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Splits `[0, vector_size)` into `workers` contiguous ranges.
///
/// Each worker gets `ceil(vector_size / workers)` elements starting at
/// `k * chunk`; the last worker takes everything from its base to the end.
/// Bases past the end of the data are clamped, so surplus workers receive
/// empty ranges instead of wrapping around.
pub fn partition(vector_size: usize, workers: usize) -> Vec<WorkAssignment> {
    if workers == 0 {
        return Vec::new();
    }

    let chunk = vector_size.div_ceil(workers);

    (0..workers)
        .map(|k| {
            let start = k.saturating_mul(chunk).min(vector_size);
            let end = if k == workers - 1 {
                vector_size
            } else {
                start.saturating_add(chunk).min(vector_size)
            };
            WorkAssignment {
                worker_id: k,
                start,
                end,
            }
        })
        .collect()
}

/// Splits `data` into one disjoint mutable slice per assignment.
///
/// # Panics
///
/// Panics if the assignments are not contiguous from index 0 or do not end
/// at `data.len()`.
pub fn split_mut<'a, T>(data: &'a mut [T], assignments: &[WorkAssignment]) -> Vec<&'a mut [T]> {
    let mut rest = data;
    let mut offset = 0;
    let mut slices = Vec::with_capacity(assignments.len());

    for assignment in assignments {
        assert_eq!(assignment.start, offset, "assignments must be contiguous");
        let (head, tail) = rest.split_at_mut(assignment.len());
        slices.push(head);
        rest = tail;
        offset = assignment.end;
    }
    assert!(rest.is_empty(), "assignments must cover the whole slice");

    slices
}
