//! Raw bindings to the message digest functions of OpenSSL's `libcrypto`.
//!
//! Only the `EVP_MD` / `EVP_MD_CTX` surface is generated. Linking against `libcrypto` and
//! locating its headers is handled by [`openssl_sys`], so this crate follows whatever OpenSSL
//! installation (or vendored build) that crate selects.
#![no_std]
#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(clippy::all)]

// pulls in the `cargo:rustc-link-lib` directives for libcrypto.
use openssl_sys as _;

include!(concat!(env!("OUT_DIR"), "/bindings.rs"));

/// Performs OpenSSL's one-time library initialisation.
///
/// Safe to call any number of times from any thread, subsequent calls are no-ops.
#[inline]
pub fn init() {
    openssl_sys::init();
}
