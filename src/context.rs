//!Compression context

use core::fmt;
use std::time::{Duration, Instant};

use crate::codec::{self, Binding};
use crate::{Algorithm, Error, Level, Result};

///Compression context, bound to single algorithm and level.
///
///Holds no mutable state: every call acquires its own scratch memory, so one context can be
///shared between threads.
///
///Releasing context is done by dropping it, or explicitly through [Shrink::cleanup].
pub struct Shrink {
    algorithm: Algorithm,
    level: Level,
    binding: Binding,
}

#[inline]
fn zeroed_vec(size: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(size).map_err(|_| Error::SystemResourceFailure {
        size,
    })?;
    buffer.resize(size, 0);
    Ok(buffer)
}

impl Shrink {
    ///Creates new context for `algorithm` with `level`.
    ///
    ///Fails with [Error::InvalidConfiguration] if algorithm is not compiled in or does not accept
    ///`level`, and with [Error::LibraryFailure] if codec library cannot be initialized.
    pub fn init(algorithm: Algorithm, level: Level) -> Result<Self> {
        let binding = match codec::resolve(algorithm, level) {
            Some(binding) => binding,
            None => {
                tracing::debug!(%algorithm, %level, "rejected configuration");
                return Err(Error::InvalidConfiguration {
                    algorithm,
                    level,
                });
            }
        };

        binding.interface.setup()?;
        tracing::debug!(%algorithm, %level, codec = binding.name, "context initialized");

        Ok(Self {
            algorithm,
            level,
            binding,
        })
    }

    #[inline(always)]
    ///Returns algorithm of this context.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline(always)]
    ///Returns level of this context.
    pub fn level(&self) -> Level {
        self.level
    }

    #[inline(always)]
    ///Returns diagnostic tag of the codec, e.g. `lzw_6` or `null`.
    pub fn algorithm_name(&self) -> &'static str {
        self.binding.name
    }

    #[inline]
    ///Returns worst case size of compressed output for `size` bytes of input.
    ///
    ///Never less than `size`, and never decreases as `size` grows.
    ///Saturates at `usize::MAX`.
    pub fn bounds(&self, size: usize) -> usize {
        self.binding.interface.bounds(&self.binding.params, size)
    }

    ///Allocates zeroed buffer of exactly `bounds(size)` bytes.
    pub fn sized_alloc(&self, size: usize) -> Result<Vec<u8>> {
        zeroed_vec(self.bounds(size))
    }

    #[inline]
    fn check_integrity(&self, src: &[u8], dst: &[u8]) -> Result<()> {
        let bound = self.bounds(dst.len());
        if bound < src.len() {
            tracing::debug!(codec = self.binding.name, len = src.len(), capacity = dst.len(), bound, "rejected buffers");
            Err(Error::Integrity {
                len: src.len(),
                capacity: dst.len(),
                bound,
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn dispatch(&self, op: fn(&codec::Interface, &codec::Params, &[u8], &mut [u8]) -> Result<usize>, src: &[u8], dst: &mut [u8], elapsed: Option<&mut Duration>) -> Result<usize> {
        if src.is_empty() {
            if let Some(elapsed) = elapsed {
                *elapsed = Duration::ZERO;
            }
            return Ok(0);
        }

        let start = Instant::now();
        let result = op(self.binding.interface, &self.binding.params, src, dst);
        let spent = start.elapsed();

        if let Some(elapsed) = elapsed {
            *elapsed = spent;
        }
        tracing::trace!(codec = self.binding.name, len = src.len(), capacity = dst.len(), ?spent, ok = result.is_ok(), "dispatched");

        result
    }

    ///Compresses `src` into `dst`, returning number of bytes written.
    ///
    ///`dst` should be at least `bounds(src.len())`. Capacity so small that `bounds(dst.len())`
    ///is less than `src.len()` is rejected with [Error::Integrity] before codec is invoked.
    ///
    ///If `elapsed` is provided, it receives time spent inside codec.
    pub fn compress(&self, src: &[u8], dst: &mut [u8], elapsed: Option<&mut Duration>) -> Result<usize> {
        self.check_integrity(src, dst)?;
        self.dispatch(codec::Interface::encode, src, dst, elapsed)
    }

    ///Decompresses `src` into `dst`, returning number of bytes written.
    ///
    ///`dst` must be large enough for the whole uncompressed data, which is expected to be known
    ///to the caller.
    ///
    ///Input is rejected with [Error::Integrity] if `bounds(dst.len())` is less than `src.len()`,
    ///as no valid compression of `dst.len()` bytes would be that big. This is heuristic only:
    ///it does not validate the stream, the codec does.
    pub fn decompress(&self, src: &[u8], dst: &mut [u8], elapsed: Option<&mut Duration>) -> Result<usize> {
        self.check_integrity(src, dst)?;
        self.dispatch(codec::Interface::decode, src, dst, elapsed)
    }

    ///Compresses `src` into newly allocated buffer, trimmed to compressed size.
    pub fn compress_to_vec(&self, src: &[u8]) -> Result<Vec<u8>> {
        let mut dst = self.sized_alloc(src.len())?;
        let len = self.compress(src, &mut dst, None)?;
        dst.truncate(len);
        Ok(dst)
    }

    ///Decompresses `src` into newly allocated buffer of `expected_len` bytes, trimmed to
    ///decompressed size.
    pub fn decompress_to_vec(&self, src: &[u8], expected_len: usize) -> Result<Vec<u8>> {
        let mut dst = zeroed_vec(expected_len)?;
        let len = self.decompress(src, &mut dst, None)?;
        dst.truncate(len);
        Ok(dst)
    }

    #[inline]
    ///Releases context.
    pub fn cleanup(self) {
        tracing::debug!(codec = self.binding.name, "context released");
    }

    #[inline]
    ///Releases context if there is any.
    pub fn cleanup_opt(ctx: Option<Self>) {
        if let Some(ctx) = ctx {
            ctx.cleanup();
        }
    }
}

impl fmt::Debug for Shrink {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Shrink")
           .field("algorithm", &self.algorithm)
           .field("level", &self.level)
           .field("name", &self.binding.name)
           .finish()
    }
}
