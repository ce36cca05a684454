//! `zstd` interface implementation

use zstd_sys as sys;

use core::ptr;

use super::{no_setup, Binding, Interface, Params};
use crate::mem::{compu_free_with_state, compu_malloc_with_state};
use crate::{Error, Level, Result};

static ZSTD: Interface = Interface::new(bounds_fn, encode_fn, decode_fn, no_setup);

pub(super) fn resolve(level: Level) -> Option<Binding> {
    let (name, quality) = match level {
        Level::Min => ("zstd_1", 1),
        Level::Mid => ("zstd_3", 3),
        //highest level without ultra window sizes
        Level::Max => ("zstd_19", 19),
        Level::None => return None,
    };

    Some(Binding::new(name, Params::new(quality), &ZSTD))
}

#[inline(always)]
const fn allocator() -> sys::ZSTD_customMem {
    sys::ZSTD_customMem {
        customAlloc: Some(compu_malloc_with_state),
        customFree: Some(compu_free_with_state),
        opaque: ptr::null_mut(),
    }
}

#[cold]
fn failure(code: usize, op: &'static str) -> Error {
    let description = crate::utils::convert_c_str(unsafe {
        sys::ZSTD_getErrorName(code)
    });
    tracing::debug!(description, op, "zstd failure");
    Error::library("zstd")
}

fn bounds_fn(_: &Params, len: usize) -> usize {
    let bound = unsafe {
        sys::ZSTD_compressBound(len)
    };

    if unsafe { sys::ZSTD_isError(bound) } != 0 || bound < len {
        usize::MAX
    } else {
        bound
    }
}

fn encode_fn(params: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    //Fresh context per call, nothing is shared between callers.
    let ctx = unsafe {
        sys::ZSTD_createCCtx_advanced(allocator())
    };
    if ctx.is_null() {
        return Err(Error::SystemResourceFailure {
            size: unsafe { sys::ZSTD_estimateCCtxSize(params.quality) },
        });
    }

    let result = unsafe {
        sys::ZSTD_compressCCtx(ctx, output.as_mut_ptr() as _, output.len(), input.as_ptr() as _, input.len(), params.quality)
    };
    unsafe {
        sys::ZSTD_freeCCtx(ctx);
    }

    match unsafe { sys::ZSTD_isError(result) } {
        0 => Ok(result),
        _ => Err(failure(result, "compress")),
    }
}

fn decode_fn(_: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    let ctx = unsafe {
        sys::ZSTD_createDCtx_advanced(allocator())
    };
    if ctx.is_null() {
        return Err(Error::SystemResourceFailure {
            size: unsafe { sys::ZSTD_estimateDCtxSize() },
        });
    }

    let result = unsafe {
        sys::ZSTD_decompressDCtx(ctx, output.as_mut_ptr() as _, output.len(), input.as_ptr() as _, input.len())
    };
    unsafe {
        sys::ZSTD_freeDCtx(ctx);
    }

    match unsafe { sys::ZSTD_isError(result) } {
        0 => Ok(result),
        _ => Err(failure(result, "decompress")),
    }
}
