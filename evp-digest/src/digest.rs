//! Digest Output
use core::{fmt, ops};
use zeroize::Zeroize;

/// The largest digest any fixed output algorithm produces (`EVP_MAX_MD_SIZE`).
pub const MAX_DIGEST_SIZE: usize = evp_digest_sys::EVP_MAX_MD_SIZE as usize;

/// A finalized digest.
///
/// The length is only known once libcrypto finalizes, so the digest lives in an inline buffer
/// of [`MAX_DIGEST_SIZE`] bytes alongside the length libcrypto reported.
///
/// # Example
///
/// ```
/// use evp_digest::{Algorithm, Session};
///
/// let md = Algorithm::Sha256.descriptor().unwrap();
/// let digest = Session::with_descriptor(&md).unwrap().finalize().unwrap();
///
/// assert_eq!(digest.len(), 32);
/// assert_eq!(
///     format!("{digest}"),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[derive(Clone)]
pub struct Digest {
    buf: [u8; MAX_DIGEST_SIZE],
    len: usize
}

impl Digest {
    // `len <= MAX_DIGEST_SIZE` is the caller's job, checked in debug builds.
    #[inline]
    pub(crate) fn new(buf: [u8; MAX_DIGEST_SIZE], len: usize) -> Self {
        debug_assert!(len <= MAX_DIGEST_SIZE, "digest length exceeds `EVP_MAX_MD_SIZE`");
        Self { buf, len }
    }

    /// The digest bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The length of the digest in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// `true` only for a zeroized digest.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copies the digest into an array of exactly its length.
    ///
    /// `None` if the digest is not `C` bytes long.
    #[inline]
    pub fn to_array<const C: usize>(&self) -> Option<[u8; C]> {
        self.as_slice().try_into().ok()
    }

    /// Copies the digest into a `Vec`.
    #[cfg(feature = "alloc")]
    #[inline]
    pub fn to_vec(&self) -> alloc::vec::Vec<u8> {
        self.as_slice().to_vec()
    }
}

impl ops::Deref for Digest {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Digest {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for Digest {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Digest {}

impl PartialEq<[u8]> for Digest {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl<const C: usize> PartialEq<[u8; C]> for Digest {
    #[inline]
    fn eq(&self, other: &[u8; C]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Zeroize for Digest {
    fn zeroize(&mut self) {
        self.buf.zeroize();
        self.len.zeroize();
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in self.as_slice() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Digest({self:x})")
    }
}
