//!Single-shot compression with one call shape for many codecs
//!
//!Pick algorithm and level once with [Shrink::init], then call [Shrink::compress] and
//![Shrink::decompress] the same way no matter which codec sits underneath.
//!
//!Destination buffers are sized from per-algorithm worst case bounds, see [Shrink::bounds] and
//![Shrink::sized_alloc].
//!
//!## Features
//!
//!- `zlib` - Enables `Deflate` using system zlib.
//!- `zlib-static` - Enables `Deflate` using bundled zlib. Default.
//!- `zlib-ng` - Enables `Deflate` using `zlib-ng`.
//!- `zstd` - Enables `Zstd`. Default.
//!- `brotli-c` - Enables `Brotli` using C library. Default.
//!- `lzma` - Enables `Lzma` using system liblzma.
//!- `lzma-static` - Enables `Lzma` using bundled liblzma. Default.
//!- `lzo` - Enables `Lzo` using bundled LZO (requires cmake). Default.
//!- `legacy` - Enables [legacy] module with process-wide context. Default.
//!- `serde` - Enables serialization of [Config].
//!
//!## Example
//!
//!```rust
//!use shrink::{Algorithm, Level, Shrink};
//!
//!let ctx = Shrink::init(Algorithm::Zstd, Level::Min).expect("zstd is available");
//!let data = [7u8; 4096];
//!
//!let mut compressed = ctx.sized_alloc(data.len()).expect("allocate");
//!let len = ctx.compress(&data, &mut compressed, None).expect("compress");
//!compressed.truncate(len);
//!
//!let mut decompressed = vec![0; data.len()];
//!let len = ctx.decompress(&compressed, &mut decompressed, None).expect("decompress");
//!assert_eq!(&decompressed[..len], &data[..]);
//!```

#![warn(missing_docs)]

mod error;
pub use error::{Error, Result};
mod config;
pub use config::{Algorithm, Level, Config, UnknownName};
pub mod mem;
mod codec;
mod context;
pub use context::Shrink;
#[cfg(feature = "legacy")]
pub mod legacy;
#[cfg(any(feature = "zstd", feature = "brotli-c", feature = "zlib", feature = "zlib-static", feature = "zlib-ng"))]
pub(crate) mod utils;

///Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///Returns library version as `(major, minor, patch)`
pub fn version() -> (u32, u32, u32) {
    let mut parts = VERSION.split('.').map(|part| part.parse().unwrap_or(0));
    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);
    (major, minor, patch)
}

#[cfg(test)]
mod tests {
    #[test]
    fn should_report_version() {
        let (major, minor, patch) = super::version();
        assert_eq!(super::VERSION, format!("{major}.{minor}.{patch}"));
    }
}
