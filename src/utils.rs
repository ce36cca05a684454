use core::ffi::{c_char, CStr};

#[inline]
///Converts static C string returned by codec into `str`
pub(crate) fn convert_c_str(text: *const c_char) -> Option<&'static str> {
    if text.is_null() {
        return None;
    }

    let text = unsafe {
        CStr::from_ptr(text)
    };
    text.to_str().ok()
}
