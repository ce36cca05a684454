//!Process-wide context
//!
//!Functions of this module operate on single global [Shrink] installed by [init].
//!
//!Access is memory safe, but any caller's [init] switches algorithm for everybody, so this
//!module is meant for single threaded programs only. Prefer owning [Shrink] directly.

use std::sync::{RwLock, RwLockReadGuard};
use std::time::Duration;

use crate::{Algorithm, Error, Level, Result, Shrink};

static CONTEXT: RwLock<Option<Shrink>> = RwLock::new(None);

#[inline]
fn read() -> RwLockReadGuard<'static, Option<Shrink>> {
    //Context is replaced as a whole, poisoning cannot leave it half written.
    CONTEXT.read().unwrap_or_else(|error| error.into_inner())
}

#[inline]
fn with_context<T>(op: impl FnOnce(&Shrink) -> Result<T>) -> Result<T> {
    match read().as_ref() {
        Some(ctx) => op(ctx),
        None => Err(Error::Uninitialized),
    }
}

///Installs new global context, releasing previous one.
///
///On failure previous context stays installed.
pub fn init(algorithm: Algorithm, level: Level) -> Result<()> {
    let ctx = Shrink::init(algorithm, level)?;
    let previous = {
        let mut slot = CONTEXT.write().unwrap_or_else(|error| error.into_inner());
        slot.replace(ctx)
    };
    Shrink::cleanup_opt(previous);
    Ok(())
}

///Releases global context, if any.
pub fn cleanup() {
    let previous = CONTEXT.write().unwrap_or_else(|error| error.into_inner()).take();
    Shrink::cleanup_opt(previous);
}

///Compresses with global context, see [Shrink::compress].
pub fn compress(src: &[u8], dst: &mut [u8], elapsed: Option<&mut Duration>) -> Result<usize> {
    with_context(|ctx| ctx.compress(src, dst, elapsed))
}

///Decompresses with global context, see [Shrink::decompress].
pub fn decompress(src: &[u8], dst: &mut [u8], elapsed: Option<&mut Duration>) -> Result<usize> {
    with_context(|ctx| ctx.decompress(src, dst, elapsed))
}

///Allocates destination with global context, see [Shrink::sized_alloc].
pub fn sized_alloc(size: usize) -> Result<Vec<u8>> {
    with_context(|ctx| ctx.sized_alloc(size))
}

///Returns bound of global context, or `None` if it is not initialized.
pub fn bounds(size: usize) -> Option<usize> {
    read().as_ref().map(|ctx| ctx.bounds(size))
}

///Returns name of global context's codec, or `None` if it is not initialized.
pub fn algorithm_name() -> Option<&'static str> {
    read().as_ref().map(Shrink::algorithm_name)
}
