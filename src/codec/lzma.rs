//! `lzma` interface implementation
//!
//!Produces single `.xz` stream with CRC32 check.
//!Decoding goes through streaming decoder, which reports damaged input as error.

use lzma_sys as sys;

use core::{mem, ptr};

use super::{no_setup, Binding, Interface, Params};
use crate::{Error, Level, Result};

static LZMA: Interface = Interface::new(bounds_fn, encode_fn, decode_fn, no_setup);

pub(super) fn resolve(level: Level) -> Option<Binding> {
    let (name, preset) = match level {
        Level::Min => ("lzma_0", 0),
        //liblzma's default
        Level::Mid => ("lzma_6", 6),
        Level::Max => ("lzma_9", 9),
        Level::None => return None,
    };

    Some(Binding::new(name, Params::new(preset), &LZMA))
}

///Input size plus twice the overhead reported by `lzma_stream_buffer_bound`.
fn bounds_fn(_: &Params, len: usize) -> usize {
    let bound = unsafe {
        sys::lzma_stream_buffer_bound(len)
    };

    //0 indicates overflow
    if bound < len {
        return usize::MAX;
    }

    len.saturating_add((bound - len).saturating_mul(2))
}

fn encode_fn(params: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    let mut written = 0;
    let result = unsafe {
        sys::lzma_easy_buffer_encode(params.quality as u32, sys::LZMA_CHECK_CRC32, ptr::null(), input.as_ptr(), input.len(), output.as_mut_ptr(), &mut written, output.len())
    };

    match result {
        sys::LZMA_OK => Ok(written),
        code => {
            tracing::debug!(code, preset = params.quality, "lzma encoding failed");
            Err(Error::library("lzma"))
        }
    }
}

fn decode_fn(_: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    //LZMA_STREAM_INIT
    let mut stream: sys::lzma_stream = unsafe {
        mem::zeroed()
    };

    let result = unsafe {
        sys::lzma_stream_decoder(&mut stream, u64::MAX, 0)
    };
    if result != sys::LZMA_OK {
        tracing::debug!(code = result, "lzma decoder init failed");
        return match result {
            sys::LZMA_MEM_ERROR => Err(Error::SystemResourceFailure {
                size: 0,
            }),
            _ => Err(Error::library("lzma")),
        };
    }

    stream.next_in = input.as_ptr();
    stream.avail_in = input.len();
    stream.next_out = output.as_mut_ptr();
    stream.avail_out = output.len();

    //Second call without progress yields LZMA_BUF_ERROR, so this terminates.
    let result = loop {
        let result = unsafe {
            sys::lzma_code(&mut stream, sys::LZMA_FINISH)
        };
        if result != sys::LZMA_OK {
            break result;
        }
    };
    let written = output.len() - stream.avail_out;
    let consumed = input.len() - stream.avail_in;

    unsafe {
        sys::lzma_end(&mut stream);
    }

    match result {
        sys::LZMA_STREAM_END => Ok(written),
        code => {
            tracing::debug!(code, consumed, written, "lzma decoding failed");
            Err(Error::library("lzma"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_levels() {
        assert_eq!(resolve(Level::Min).map(|binding| binding.params.quality), Some(0));
        assert_eq!(resolve(Level::Mid).map(|binding| binding.name), Some("lzma_6"));
        assert_eq!(resolve(Level::Max).map(|binding| binding.params.quality), Some(9));
        assert!(resolve(Level::None).is_none());
    }

    #[test]
    fn should_keep_margin_over_library_bound() {
        let binding = resolve(Level::Min).expect("lzma binding");
        for len in [0usize, 1, 4096, 1 << 20] {
            let library = unsafe {
                sys::lzma_stream_buffer_bound(len)
            };
            let bound = binding.interface.bounds(&binding.params, len);
            assert!(bound >= library);
            assert_eq!(bound - len, 2 * (library - len));
        }
    }

    #[test]
    fn should_reject_truncated_stream() {
        let binding = resolve(Level::Min).expect("lzma binding");
        let input = [0xAAu8; 1024];
        let mut compressed = vec![0u8; binding.interface.bounds(&binding.params, input.len())];
        let len = binding.interface.encode(&binding.params, &input, &mut compressed).expect("compress");

        let mut output = [0u8; 1024];
        for cut in [1, len / 2, len - 1] {
            let error = binding.interface.decode(&binding.params, &compressed[..cut], &mut output).unwrap_err();
            assert_eq!(error, Error::library("lzma"));
        }

        let written = binding.interface.decode(&binding.params, &compressed[..len], &mut output).expect("decompress");
        assert_eq!(&output[..written], &input[..]);
    }

    #[test]
    fn should_reject_short_output() {
        let binding = resolve(Level::Min).expect("lzma binding");
        let input = [0x55u8; 4096];
        let mut compressed = vec![0u8; binding.interface.bounds(&binding.params, input.len())];
        let len = binding.interface.encode(&binding.params, &input, &mut compressed).expect("compress");

        let mut output = [0u8; 100];
        let error = binding.interface.decode(&binding.params, &compressed[..len], &mut output).unwrap_err();
        assert_eq!(error, Error::library("lzma"));
    }
}
