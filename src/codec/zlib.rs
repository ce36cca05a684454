//! `zlib` interface implementation
//!
//!Produces zlib format (deflate with zlib header and adler32 trailer).

#[cfg(feature = "zlib-ng")]
use libz_ng_sys as sys;
#[cfg(not(feature = "zlib-ng"))]
use libz_sys as sys;

use core::ffi::{c_char, c_int, c_ulong};

use super::{no_setup, Binding, Interface, Params};
use crate::{Error, Level, Result};

extern "C" {
    #[cfg_attr(feature = "zlib-ng", link_name = "zng_zError")]
    fn zError(code: c_int) -> *const c_char;
}

static ZLIB: Interface = Interface::new(bounds_fn, encode_fn, decode_fn, no_setup);

pub(super) fn resolve(level: Level) -> Option<Binding> {
    let (name, quality) = match level {
        Level::Min => ("lzw_1", 1),
        //zlib's default
        Level::Mid => ("lzw_6", 6),
        Level::Max => ("lzw_9", 9),
        Level::None => return None,
    };

    Some(Binding::new(name, Params::new(quality), &ZLIB))
}

#[inline(always)]
fn fits(len: usize) -> bool {
    len as u64 <= c_ulong::MAX as u64
}

#[cold]
fn failure(code: c_int, op: &'static str) -> Error {
    let description = crate::utils::convert_c_str(unsafe {
        zError(code)
    });
    tracing::debug!(code, description, op, "zlib failure");
    Error::library("zlib")
}

fn bounds_fn(_: &Params, len: usize) -> usize {
    if !fits(len) {
        return usize::MAX;
    }

    let bound = unsafe {
        sys::compressBound(len as _)
    } as usize;

    //wrapped around
    if bound < len {
        usize::MAX
    } else {
        bound
    }
}

fn encode_fn(params: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    if !fits(input.len()) {
        return Err(Error::library("zlib"));
    }

    //zlib never writes beyond `written` on input
    let mut written = output.len().min(c_ulong::MAX as usize) as _;
    let result = unsafe {
        sys::compress2(output.as_mut_ptr(), &mut written, input.as_ptr(), input.len() as _, params.quality as c_int)
    };

    match result {
        sys::Z_OK => Ok(written as usize),
        code => Err(failure(code, "compress2")),
    }
}

fn decode_fn(_: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    if !fits(input.len()) {
        return Err(Error::library("zlib"));
    }

    let mut written = output.len().min(c_ulong::MAX as usize) as _;
    let result = unsafe {
        sys::uncompress(output.as_mut_ptr(), &mut written, input.as_ptr(), input.len() as _)
    };

    match result {
        sys::Z_OK => Ok(written as usize),
        code => Err(failure(code, "uncompress")),
    }
}
