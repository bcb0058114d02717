//! C Interface
//!
//! Exports the session lifecycle over a C ABI for environments which load this crate as a
//! `cdylib`/`staticlib`. Sessions are handed out as opaque pointers, descriptors are libcrypto's
//! own `EVP_MD` pointers. The declarations live in `include/evp_digest.h`.
//!
//! Every function returning `c_int` returns [`Error::OK_CODE`] (`1`) on success and
//! [`Error::code`] otherwise. Null handles are reported as [`Error::InvalidState`].
//!
//! ```c
//! const EVP_MD *md = evp_digest_by_name("SHA256");
//! EvpDigestSession *s = evp_digest_session_new();
//!
//! unsigned char out[64];
//! size_t out_len = 0;
//!
//! evp_digest_session_init(s, md);
//! evp_digest_session_update(s, (const unsigned char *)"abc", 3);
//! evp_digest_session_final(s, out, sizeof(out), &out_len);
//! evp_digest_session_free(s);
//! ```
use alloc::boxed::Box;
use core::ffi::{c_char, c_int, CStr};
use core::{ptr, slice};
use evp_digest_sys::EVP_MD;
use crate::algorithm::Descriptor;
use crate::error::Error;
use crate::session::Session;

/// The session handle as seen from C.
pub type EvpDigestSession = Session;

#[inline]
fn status(res: Result<(), Error>) -> c_int {
    res.map_or_else(Error::code, |()| Error::OK_CODE)
}

/// Resolve a digest by its NUL terminated name, null if unknown or not valid UTF-8.
///
/// # Safety
///
/// `name` must be null or point to a NUL terminated string.
#[no_mangle]
pub unsafe extern "C" fn evp_digest_by_name(name: *const c_char) -> *const EVP_MD {
    if name.is_null() {
        return ptr::null();
    }

    CStr::from_ptr(name)
        .to_str()
        .ok()
        .and_then(|name| Descriptor::by_name(name).ok())
        .map_or(ptr::null(), |md| md.as_ptr())
}

/// Allocate a new, uninitialized session, null on allocation failure.
///
/// The session must be released with [`evp_digest_session_free`].
#[no_mangle]
pub extern "C" fn evp_digest_session_new() -> *mut EvpDigestSession {
    Session::new().map_or(ptr::null_mut(), |session| Box::into_raw(Box::new(session)))
}

/// Bind `session` to `md`, see [`Session::init`].
///
/// # Safety
///
/// `session` must be null or a live handle from [`evp_digest_session_new`], `md` must be null
/// or come from [`evp_digest_by_name`].
#[no_mangle]
pub unsafe extern "C" fn evp_digest_session_init(
    session: *mut EvpDigestSession,
    md: *const EVP_MD
) -> c_int {
    match (session.as_mut(), Descriptor::from_raw(md)) {
        (Some(session), Some(md)) => status(session.init(&md)),
        _ => Error::InvalidState.code()
    }
}

/// Feed `len` bytes at `data` into `session`, see [`Session::update`].
///
/// `data` may be null only when `len` is zero.
///
/// # Safety
///
/// `session` must be null or a live handle from [`evp_digest_session_new`], a non-null `data`
/// must be valid for reads of `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn evp_digest_session_update(
    session: *mut EvpDigestSession,
    data: *const u8,
    len: usize
) -> c_int {
    let Some(session) = session.as_mut() else { return Error::InvalidState.code() };

    let data = match (data.is_null(), len) {
        (_, 0) => &[][..],
        (true, _) => return Error::InvalidState.code(),
        (false, _) => slice::from_raw_parts(data, len)
    };

    status(session.update(data))
}

/// Finalize `session` into the `capacity` bytes at `out`, see [`Session::finalize_into`].
///
/// On success the digest length is written to `out_len` (if non-null).
///
/// # Safety
///
/// `session` must be null or a live handle from [`evp_digest_session_new`], a non-null `out`
/// must be valid for writes of `capacity` bytes, a non-null `out_len` must be valid for a
/// write.
#[no_mangle]
pub unsafe extern "C" fn evp_digest_session_final(
    session: *mut EvpDigestSession,
    out: *mut u8,
    capacity: usize,
    out_len: *mut usize
) -> c_int {
    let Some(session) = session.as_mut() else { return Error::InvalidState.code() };
    if out.is_null() { return Error::InvalidState.code() }

    let output = slice::from_raw_parts_mut(out, capacity);

    match session.finalize_into(output) {
        Ok(len) => {
            if let Some(out_len) = out_len.as_mut() {
                *out_len = len;
            }
            Error::OK_CODE
        },
        Err(err) => err.code()
    }
}

/// Release `session`, null is ignored.
///
/// # Safety
///
/// `session` must be null or a live handle from [`evp_digest_session_new`] which is not used
/// again afterwards.
#[no_mangle]
pub unsafe extern "C" fn evp_digest_session_free(session: *mut EvpDigestSession) {
    if !session.is_null() {
        drop(Box::from_raw(session));
    }
}
