//! `brotli` interface implementation

use compu_brotli_sys as sys;

use core::ptr;

use super::{no_setup, Binding, Interface, Params};
use crate::mem::{compu_free_with_state, compu_malloc_with_state};
use crate::{Error, Level, Result};

static BROTLI: Interface = Interface::new(bounds_fn, encode_fn, decode_fn, no_setup);

//BROTLI_DEFAULT_WINDOW
const WINDOW_BITS: i32 = 22;

pub(super) fn resolve(level: Level) -> Option<Binding> {
    let (name, quality) = match level {
        Level::Min => ("brotli_1", 1),
        Level::Mid => ("brotli_6", 6),
        Level::Max => ("brotli_11", 11),
        Level::None => return None,
    };

    Some(Binding::new(name, Params::new(quality), &BROTLI))
}

fn bounds_fn(_: &Params, len: usize) -> usize {
    let bound = unsafe {
        sys::BrotliEncoderMaxCompressedSize(len)
    };

    //0 on overflow
    if bound < len {
        usize::MAX
    } else {
        bound
    }
}

fn encode_fn(params: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    let mut written = output.len();
    //One-shot encoder falls back to uncompressed meta-blocks, which keeps output within bound.
    let result = unsafe {
        sys::BrotliEncoderCompress(params.quality, WINDOW_BITS, sys::BrotliEncoderMode_BROTLI_MODE_GENERIC, input.len(), input.as_ptr(), &mut written, output.as_mut_ptr())
    };

    match result {
        0 => {
            tracing::debug!(quality = params.quality, capacity = output.len(), "brotli encoding failed");
            Err(Error::library("brotli"))
        },
        _ => Ok(written),
    }
}

#[cold]
//size of decoder state is private to the library
const fn out_of_memory() -> Error {
    Error::SystemResourceFailure {
        size: 0,
    }
}

fn decode_fn(_: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    let state = unsafe {
        sys::BrotliDecoderCreateInstance(Some(compu_malloc_with_state), Some(compu_free_with_state), ptr::null_mut())
    };
    if state.is_null() {
        return Err(out_of_memory());
    }

    let mut input_ptr = input.as_ptr();
    let mut input_remain = input.len();
    let mut output_ptr = output.as_mut_ptr();
    let mut output_remain = output.len();
    let result = unsafe {
        sys::BrotliDecoderDecompressStream(state, &mut input_remain, &mut input_ptr, &mut output_remain, &mut output_ptr, ptr::null_mut())
    };

    let outcome = match result {
        sys::BrotliDecoderResult_BROTLI_DECODER_RESULT_SUCCESS => Ok(output.len() - output_remain),
        sys::BrotliDecoderResult_BROTLI_DECODER_RESULT_ERROR => {
            let code = unsafe {
                sys::BrotliDecoderGetErrorCode(state)
            };
            let description = crate::utils::convert_c_str(unsafe {
                sys::BrotliDecoderErrorString(code)
            });
            tracing::debug!(description, "brotli decoding failed");
            Err(Error::library("brotli"))
        },
        //Truncated stream or output too short
        other => {
            tracing::debug!(status = other as i64, input_remain, output_remain, "brotli decoding incomplete");
            Err(Error::library("brotli"))
        },
    };

    unsafe {
        sys::BrotliDecoderDestroyInstance(state);
    }

    outcome
}
