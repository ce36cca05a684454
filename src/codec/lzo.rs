//! `lzo` interface implementation

use lzo_sys::{lzo1x, lzoconf};

use super::{Binding, Interface, Params};
use crate::mem::Scratch;
use crate::{Error, Level, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
///LZO1X compressor variant
enum Variant {
    Fast,
    Fast15,
    Best,
}

impl Variant {
    const fn name(self) -> &'static str {
        match self {
            Variant::Fast => "lzo1x_1",
            Variant::Fast15 => "lzo1x_1_15",
            Variant::Best => "lzo1x_999",
        }
    }

    ///Size of working memory required by compressor
    const fn scratch_size(self) -> usize {
        match self {
            Variant::Fast => lzo1x::LZO1X_1_MEM_COMPRESS as usize,
            Variant::Fast15 => lzo1x::LZO1X_1_15_MEM_COMPRESS as usize,
            Variant::Best => lzo1x::LZO1X_999_MEM_COMPRESS as usize,
        }
    }

    fn compress_fn(self) -> lzoconf::lzo_compress_t {
        match self {
            Variant::Fast => lzo1x::lzo1x_1_compress,
            Variant::Fast15 => lzo1x::lzo1x_1_15_compress,
            Variant::Best => lzo1x::lzo1x_999_compress,
        }
    }

    const fn from_quality(quality: i32) -> Self {
        match quality {
            1 => Variant::Fast,
            2 => Variant::Fast15,
            _ => Variant::Best,
        }
    }

    const fn quality(self) -> i32 {
        match self {
            Variant::Fast => 1,
            Variant::Fast15 => 2,
            Variant::Best => 3,
        }
    }
}

static LZO: Interface = Interface::new(bounds_fn, encode_fn, decode_fn, setup_fn);

pub(super) fn resolve(level: Level) -> Option<Binding> {
    let variant = match level {
        Level::Min => Variant::Fast,
        Level::Mid => Variant::Fast15,
        Level::Max => Variant::Best,
        Level::None => return None,
    };

    Some(Binding::new(variant.name(), Params::new(variant.quality()), &LZO))
}

#[inline]
///Worst case expansion of LZO1X as documented by its FAQ
const fn bound(len: usize) -> usize {
    len.saturating_add(len / 16).saturating_add(64 + 3)
}

fn setup_fn() -> Result<()> {
    let result = unsafe {
        lzoconf::lzo_init()
    };

    match result {
        lzoconf::LZO_E_OK => Ok(()),
        code => {
            tracing::debug!(code, "lzo_init failed");
            Err(Error::library("lzo"))
        }
    }
}

#[inline]
fn bounds_fn(_: &Params, len: usize) -> usize {
    bound(len)
}

fn encode_fn(params: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    let variant = Variant::from_quality(params.quality);
    //Compressor writes up to worst case without checking output size.
    let worst = bound(input.len());
    if output.len() >= worst {
        return compress(variant, input, output);
    }

    let mut temp = Vec::new();
    temp.try_reserve_exact(worst).map_err(|_| Error::SystemResourceFailure {
        size: worst,
    })?;
    temp.resize(worst, 0);
    let len = compress(variant, input, &mut temp)?;
    match output.get_mut(..len) {
        Some(output) => {
            output.copy_from_slice(&temp[..len]);
            Ok(len)
        },
        None => Err(Error::library(variant.name())),
    }
}

//`output` must hold `bound(input.len())`
fn compress(variant: Variant, input: &[u8], output: &mut [u8]) -> Result<usize> {
    debug_assert!(output.len() >= bound(input.len()));

    //Dictionary content affects output, so it must start zeroed for identical results.
    let mut wrkmem = Scratch::zeroed(variant.scratch_size())?;
    let mut written: usize = output.len();
    let compress_fn = variant.compress_fn();
    let result = unsafe {
        compress_fn(input.as_ptr(), input.len(), output.as_mut_ptr(), &mut written, wrkmem.as_mut_ptr())
    };

    match result {
        lzoconf::LZO_E_OK if written <= output.len() => Ok(written),
        code => {
            tracing::debug!(code, codec = variant.name(), "compression failed");
            Err(Error::library(variant.name()))
        }
    }
}

fn decode_fn(_: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    let mut written: usize = output.len();
    let result = unsafe {
        lzo1x::lzo1x_decompress_safe(input.as_ptr(), input.len(), output.as_mut_ptr(), &mut written, core::ptr::null_mut())
    };

    match result {
        lzoconf::LZO_E_OK => Ok(written),
        code => {
            tracing::debug!(code, "lzo1x decompression failed");
            Err(Error::library("lzo1x"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_levels_to_variants() {
        assert_eq!(resolve(Level::Min).map(|binding| binding.name), Some("lzo1x_1"));
        assert_eq!(resolve(Level::Mid).map(|binding| binding.name), Some("lzo1x_1_15"));
        assert_eq!(resolve(Level::Max).map(|binding| binding.name), Some("lzo1x_999"));
        assert!(resolve(Level::None).is_none());

        for variant in [Variant::Fast, Variant::Fast15, Variant::Best] {
            assert_eq!(Variant::from_quality(variant.quality()), variant);
        }
    }

    #[test]
    fn should_compute_documented_bound() {
        assert_eq!(bound(0), 67);
        assert_eq!(bound(1600), 1600 + 100 + 67);
        assert_eq!(bound(usize::MAX), usize::MAX);
    }

    #[test]
    fn should_compress_into_short_output() {
        setup_fn().expect("lzo_init");
        let binding = resolve(Level::Min).expect("lzo binding");
        let input = [0x55u8; 1000];
        //Well below worst case, but plenty for repeated byte
        let mut output = [0u8; 200];
        let written = binding.interface.encode(&binding.params, &input, &mut output).expect("compress");
        assert!(written < output.len());

        let mut decompressed = [0u8; 1000];
        let len = binding.interface.decode(&binding.params, &output[..written], &mut decompressed).expect("decompress");
        assert_eq!(len, input.len());
        assert_eq!(decompressed, input);
    }

    #[test]
    fn should_compress_identically_every_call() {
        setup_fn().expect("lzo_init");
        let input: Vec<u8> = (0..64 * 1024u32).map(|idx| (idx % 97) as u8 ^ (idx >> 9) as u8).collect();
        for level in [Level::Min, Level::Mid, Level::Max] {
            let binding = resolve(level).expect("lzo binding");
            let mut first = vec![0u8; bound(input.len())];
            let mut second = vec![0xFFu8; bound(input.len())];
            let first_len = binding.interface.encode(&binding.params, &input, &mut first).expect("compress");
            let second_len = binding.interface.encode(&binding.params, &input, &mut second).expect("compress");
            assert_eq!(&first[..first_len], &second[..second_len], "{}", binding.name);
        }
    }
}
