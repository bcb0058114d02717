//! Accumulation of libcrypto status codes.
//!
//! `EVP_*` functions report success with `1` and failure with anything else. `Res` folds any
//! number of these into a single success flag which is then turned into a `Result`.
use core::ffi::c_int;
use crate::error::Error;

#[must_use = "You must handle the potential error"]
#[repr(transparent)]
pub struct Res(bool);

impl Res {
    pub const OK: Self = Self(true);
    #[cfg(test)]
    pub const ERR: Self = Self(false);

    pub const fn new() -> Self {
        Self::OK
    }

    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.0
    }

    #[cfg(test)]
    #[inline]
    pub const fn is_err(&self) -> bool {
        !self.0
    }

    /// Sets the error state if `res` is `false`.
    #[inline]
    pub fn check(&mut self, res: bool) {
        self.0 &= res;
    }

    /// Sets the error state unless libcrypto returned `1`.
    #[inline]
    pub fn ensure_1(&mut self, res: c_int) {
        self.0 &= res == 1;
    }

    /// `Ok(ok)` if no failure was recorded, otherwise `Err(err)`.
    #[inline(always)]
    pub fn into_result<OK>(self, ok: OK, err: Error) -> Result<OK, Error> {
        if self.is_ok() {
            Ok(ok)
        } else {
            Err(err)
        }
    }

    /// Like [`into_result`], only constructing the `OK` value on success.
    ///
    /// [`into_result`]: Self::into_result
    #[inline(always)]
    pub fn into_result_with<F, OK>(self, ok: F, err: Error) -> Result<OK, Error>
        where F: FnOnce() -> OK
    {
        if self.is_ok() {
            Ok(ok())
        } else {
            Err(err)
        }
    }
}
