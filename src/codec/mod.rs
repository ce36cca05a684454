//!Codec bindings
//!
//!Each codec exposes single static [Interface] per variant, selected by its own `resolve`
//!function out of private level table.
//!
//!Codecs operate on safe slices, `unsafe` is confined to FFI calls inside each module.

use crate::{Algorithm, Level, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
///Codec parameters resolved from [Level].
pub(crate) struct Params {
    ///Codec specific quality: zlib level, lzma preset, etc.
    pub quality: i32,
}

impl Params {
    #[inline(always)]
    pub(crate) const fn new(quality: i32) -> Self {
        Self {
            quality,
        }
    }
}

///Capability table of codec.
pub(crate) struct Interface {
    //worst case output for input size, MUST be >= input and monotonic
    bounds_fn: fn(&Params, usize) -> usize,
    //MUST not write beyond output
    encode_fn: fn(&Params, &[u8], &mut [u8]) -> Result<usize>,
    decode_fn: fn(&Params, &[u8], &mut [u8]) -> Result<usize>,
    //one-time global library setup, performed on every context creation
    setup_fn: fn() -> Result<()>,
}

impl Interface {
    ///Creates new `Interface` out of codec functions.
    pub(crate) const fn new(
        bounds_fn: fn(&Params, usize) -> usize,
        encode_fn: fn(&Params, &[u8], &mut [u8]) -> Result<usize>,
        decode_fn: fn(&Params, &[u8], &mut [u8]) -> Result<usize>,
        setup_fn: fn() -> Result<()>,
    ) -> Self {
        Self {
            bounds_fn,
            encode_fn,
            decode_fn,
            setup_fn,
        }
    }

    #[inline(always)]
    pub(crate) fn bounds(&self, params: &Params, len: usize) -> usize {
        (self.bounds_fn)(params, len)
    }

    #[inline(always)]
    pub(crate) fn encode(&self, params: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
        (self.encode_fn)(params, input, output)
    }

    #[inline(always)]
    pub(crate) fn decode(&self, params: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
        (self.decode_fn)(params, input, output)
    }

    #[inline(always)]
    pub(crate) fn setup(&self) -> Result<()> {
        (self.setup_fn)()
    }
}

///Nothing to set up
pub(crate) fn no_setup() -> Result<()> {
    Ok(())
}

#[derive(Copy, Clone)]
///Codec selected for algorithm and level.
pub(crate) struct Binding {
    ///Diagnostic tag, distinct per level.
    pub name: &'static str,
    pub params: Params,
    pub interface: &'static Interface,
}

impl Binding {
    #[inline(always)]
    pub(crate) const fn new(name: &'static str, params: Params, interface: &'static Interface) -> Self {
        Self {
            name,
            params,
            interface,
        }
    }
}

///Returns binding for the pair, or `None` if codec is absent or rejects level.
pub(crate) fn resolve(algorithm: Algorithm, level: Level) -> Option<Binding> {
    match algorithm {
        Algorithm::None => null::resolve(level),
        #[cfg(feature = "lzo")]
        Algorithm::Lzo => lzo::resolve(level),
        #[cfg(any(feature = "zlib", feature = "zlib-static", feature = "zlib-ng"))]
        Algorithm::Deflate => zlib::resolve(level),
        #[cfg(any(feature = "lzma", feature = "lzma-static"))]
        Algorithm::Lzma => lzma::resolve(level),
        #[cfg(feature = "zstd")]
        Algorithm::Zstd => zstd::resolve(level),
        #[cfg(feature = "brotli-c")]
        Algorithm::Brotli => brotli::resolve(level),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

mod null;
#[cfg(feature = "lzo")]
mod lzo;
#[cfg(any(feature = "zlib", feature = "zlib-static", feature = "zlib-ng"))]
mod zlib;
#[cfg(any(feature = "lzma", feature = "lzma-static"))]
mod lzma;
#[cfg(feature = "zstd")]
mod zstd;
#[cfg(feature = "brotli-c")]
mod brotli;
