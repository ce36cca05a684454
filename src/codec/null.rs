//! Pass-through codec

use super::{no_setup, Binding, Interface, Params};
use crate::{Error, Level, Result};

static NULL: Interface = Interface::new(bounds_fn, copy_fn, copy_fn, no_setup);

const NAME: &str = "null";

pub(super) fn resolve(level: Level) -> Option<Binding> {
    match level {
        Level::None => Some(Binding::new(NAME, Params::new(0), &NULL)),
        _ => None,
    }
}

#[inline]
fn bounds_fn(_: &Params, len: usize) -> usize {
    len
}

#[inline]
fn copy_fn(_: &Params, input: &[u8], output: &mut [u8]) -> Result<usize> {
    match output.get_mut(..input.len()) {
        Some(output) => {
            output.copy_from_slice(input);
            Ok(input.len())
        },
        None => Err(Error::library(NAME)),
    }
}
