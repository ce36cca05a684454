//!Memory used by codecs: Rust allocator backed `malloc`/`free` and per call scratch space
use core::ffi::c_void;
use core::{mem, ptr};

use std::alloc::{self, Layout};

use crate::{Error, Result};

//Linux & win 32 bit are 8
#[cfg(not(any(target_os = "macos", all(windows, target_pointer_width = "64"))))]
const MIN_ALIGN: usize = 8;
//Mac and  win 64 bit are 16
#[cfg(any(target_os = "macos", all(windows, target_pointer_width = "64")))]
const MIN_ALIGN: usize = 16;

const LAYOUT_OFFSET: usize = mem::size_of::<usize>();
//Enough for any `lzo_align_t` member
const SCRATCH_ALIGN: usize = 16;

#[cold]
#[inline(never)]
fn unlikely_null() -> *mut c_void {
    ptr::null_mut()
}

#[inline]
///`malloc` impl with Rust allocator
pub unsafe extern "C" fn compu_malloc(size: usize) -> *mut c_void {
    let total = match size.checked_add(LAYOUT_OFFSET) {
        Some(total) => total,
        None => return unlikely_null(),
    };
    if let Ok(layout) = Layout::from_size_align(total, MIN_ALIGN) {
        let mem = alloc::alloc(layout);
        if !mem.is_null() {
            ptr::write(mem as *mut usize, size);
            return mem.add(LAYOUT_OFFSET) as _
        }
    }

    unlikely_null()
}

#[inline]
///`free` impl with Rust allocator
///
///Accepts only pointers returned by [compu_malloc] or null.
pub unsafe extern "C" fn compu_free(mem: *mut c_void) {
    if !mem.is_null() {
        let mem = (mem as *mut u8).offset(-(LAYOUT_OFFSET as isize));
        let size = ptr::read(mem as *const usize);
        let layout = Layout::from_size_align_unchecked(size + LAYOUT_OFFSET, MIN_ALIGN);
        alloc::dealloc(mem, layout);
    }
}

#[allow(unused)]
///`malloc` alternative with Rust allocator
pub(crate) unsafe extern "C" fn compu_malloc_with_state(_: *mut c_void, size: usize) -> *mut c_void {
    compu_malloc(size)
}

#[allow(unused)]
pub(crate) unsafe extern "C" fn compu_free_with_state(_: *mut c_void, mem: *mut c_void) {
    compu_free(mem)
}

///Zero initialized working memory, owned by a single codec call.
///
///Never cached between calls, so that every call starts from identical state.
pub struct Scratch {
    ptr: ptr::NonNull<u8>,
    size: usize,
}

impl Scratch {
    ///Allocates `size` zeroed bytes.
    ///
    ///Returns [Error::SystemResourceFailure] if allocator fails.
    pub fn zeroed(size: usize) -> Result<Self> {
        if size == 0 {
            return Ok(Self {
                ptr: ptr::NonNull::dangling(),
                size,
            });
        }

        let layout = Layout::from_size_align(size, SCRATCH_ALIGN).map_err(|_| Error::SystemResourceFailure {
            size,
        })?;
        let mem = unsafe {
            alloc::alloc_zeroed(layout)
        };

        match ptr::NonNull::new(mem) {
            Some(ptr) => Ok(Self {
                ptr,
                size,
            }),
            None => Err(Error::SystemResourceFailure {
                size,
            }),
        }
    }

    #[inline(always)]
    ///Returns raw pointer to pass to the codec
    pub fn as_mut_ptr(&mut self) -> *mut c_void {
        self.ptr.as_ptr() as _
    }
}

impl Drop for Scratch {
    #[inline]
    fn drop(&mut self) {
        if self.size > 0 {
            unsafe {
                let layout = Layout::from_size_align_unchecked(self.size, SCRATCH_ALIGN);
                alloc::dealloc(self.ptr.as_ptr(), layout);
            }
        }
    }
}
