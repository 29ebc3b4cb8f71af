//! Worker threads: CPU pinning, prefetch hints and the DAXPY kernel.

use std::io;
use std::thread;
use std::time::Instant;

use log::{debug, trace};

use crate::config::DaxpyConfig;
use crate::error::{Error, Result};
use crate::partition::{split_mut, WorkAssignment};
use crate::vector::VectorTriple;

/// Pins the calling thread to logical CPU `cpu`.
///
/// Affinity is only a hint: the return value says whether the request was
/// accepted, and callers carry on either way.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> bool {
    if cpu >= libc::CPU_SETSIZE as usize {
        return false;
    }

    // SAFETY: `set` is a plain bitmask owned by this frame and `cpu` is
    // within its bounds.
    unsafe {
        let mut set: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_ZERO(&mut set);
        libc::CPU_SET(cpu, &mut set);
        libc::pthread_setaffinity_np(
            libc::pthread_self(),
            std::mem::size_of::<libc::cpu_set_t>(),
            &set,
        ) == 0
    }
}

/// Pins the calling thread to logical CPU `cpu`.
///
/// No affinity API is wired up on this platform, so this always reports
/// failure.
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> bool {
    false
}

/// Hints that `ptr` is about to be read.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn prefetch_read<T>(ptr: *const T) {
    use std::arch::x86_64::{_mm_prefetch, _MM_HINT_NTA};

    // SAFETY: prefetching never faults, whatever the address.
    unsafe { _mm_prefetch::<_MM_HINT_NTA>(ptr as *const i8) }
}

/// Hints that `ptr` is about to be read.
#[cfg(all(target_arch = "x86", target_feature = "sse"))]
#[inline(always)]
pub fn prefetch_read<T>(ptr: *const T) {
    use std::arch::x86::{_mm_prefetch, _MM_HINT_NTA};

    // SAFETY: prefetching never faults, whatever the address.
    unsafe { _mm_prefetch::<_MM_HINT_NTA>(ptr as *const i8) }
}

/// Hints that `ptr` is about to be read.
#[cfg(not(any(
    target_arch = "x86_64",
    all(target_arch = "x86", target_feature = "sse")
)))]
#[inline(always)]
pub fn prefetch_read<T>(_ptr: *const T) {}

/// Hints that `ptr` is about to be written.
///
/// SSE has no portable write-intent prefetch, so this pulls the line in the
/// same way as a read.
#[inline(always)]
pub fn prefetch_write<T>(ptr: *const T) {
    prefetch_read(ptr)
}

/// Computes `c[i] = alpha * a[i] + b[i]` for every index of `c`.
///
/// While at least `prefetch_distance` elements remain, the lines for
/// `i + prefetch_distance` are prefetched first. A distance of 0 disables
/// prefetching.
///
/// # Panics
///
/// Panics if the three slices differ in length.
pub fn axpy(alpha: f64, a: &[f64], b: &[f64], c: &mut [f64], prefetch_distance: usize) {
    assert_eq!(a.len(), c.len(), "Vector lengths must match");
    assert_eq!(b.len(), c.len(), "Vector lengths must match");

    let len = c.len();
    for i in 0..len {
        // Written as a subtraction so huge distances cannot overflow
        if prefetch_distance > 0 && prefetch_distance < len - i {
            let ahead = i + prefetch_distance;
            prefetch_read(a.as_ptr().wrapping_add(ahead));
            prefetch_read(b.as_ptr().wrapping_add(ahead));
            prefetch_write(c.as_ptr().wrapping_add(ahead));
        }
        c[i] = alpha * a[i] + b[i];
    }
}

/// Runs the DAXPY kernel on one thread per assignment and waits for all of
/// them.
pub fn dispatch(
    triple: &mut VectorTriple,
    config: &DaxpyConfig,
    assignments: &[WorkAssignment],
) -> Result<()> {
    let alpha = config.alpha;
    let distance = config.prefetch_distance;
    dispatch_with(triple, assignments, move |_, a, b, c| {
        axpy(alpha, a, b, c, distance)
    })
}

/// Starts worker threads inside a [`thread::scope`].
pub trait Spawner {
    /// Spawns the thread for `worker` running `f`.
    fn spawn<'scope, 'env, F>(
        &self,
        scope: &'scope thread::Scope<'scope, 'env>,
        worker: usize,
        f: F,
    ) -> io::Result<thread::ScopedJoinHandle<'scope, ()>>
    where
        F: FnOnce() + Send + 'scope;
}

/// Spawns OS threads named `daxpy-worker-{k}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedThreads;

impl Spawner for NamedThreads {
    fn spawn<'scope, 'env, F>(
        &self,
        scope: &'scope thread::Scope<'scope, 'env>,
        worker: usize,
        f: F,
    ) -> io::Result<thread::ScopedJoinHandle<'scope, ()>>
    where
        F: FnOnce() + Send + 'scope,
    {
        thread::Builder::new()
            .name(format!("daxpy-worker-{worker}"))
            .spawn_scoped(scope, f)
    }
}

/// Like [`dispatch`], with a caller-supplied kernel.
///
/// Worker `k` is pinned to CPU `k`, then calls `kernel(k, a, b, c)` with the
/// sub-slices for its range. Only `c` is written and no two workers share an
/// index, so no locking is needed.
pub fn dispatch_with<F>(
    triple: &mut VectorTriple,
    assignments: &[WorkAssignment],
    kernel: F,
) -> Result<()>
where
    F: Fn(usize, &[f64], &[f64], &mut [f64]) + Sync,
{
    dispatch_on(&NamedThreads, triple, assignments, kernel)
}

/// Like [`dispatch_with`], starting the workers through `spawner`.
///
/// Spawning stops at the first failure. Every worker that did start is
/// joined before returning, and the first spawn or join failure is reported.
pub fn dispatch_on<S, F>(
    spawner: &S,
    triple: &mut VectorTriple,
    assignments: &[WorkAssignment],
    kernel: F,
) -> Result<()>
where
    S: Spawner,
    F: Fn(usize, &[f64], &[f64], &mut [f64]) + Sync,
{
    let a: &[f64] = &triple.a;
    let b: &[f64] = &triple.b;
    let outputs = split_mut(&mut triple.c[..], assignments);
    let kernel = &kernel;

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(assignments.len());
        let mut failure = None;

        for (assignment, c) in assignments.iter().zip(outputs) {
            let worker = assignment.worker_id;
            let a = &a[assignment.range()];
            let b = &b[assignment.range()];

            let spawned = spawner.spawn(s, worker, move || {
                let pinned = pin_to_cpu(worker);
                debug!("worker {worker} pinned to cpu {worker}: {pinned}");

                let start = Instant::now();
                kernel(worker, a, b, c);
                trace!(
                    "worker {worker} processed {} elements in {:.2?}",
                    c.len(),
                    start.elapsed()
                );
            });

            match spawned {
                Ok(handle) => handles.push((worker, handle)),
                Err(source) => {
                    failure = Some(Error::ThreadSpawn { worker, source });
                    break;
                }
            }
        }

        for (worker, handle) in handles {
            if handle.join().is_err() && failure.is_none() {
                failure = Some(Error::ThreadJoin { worker });
            }
        }

        failure.map_or(Ok(()), Err)
    })
}
