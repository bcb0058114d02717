//! Digest Algorithm Lookup
//!
//! A [`Descriptor`] is libcrypto's `EVP_MD` for some digest, resolved by name. Descriptors are
//! owned by libcrypto, they are never freed and may be shared freely between sessions and
//! threads.
use core::fmt;
use core::str::FromStr;
use evp_digest_sys::{EVP_get_digestbyname, EVP_MD};
use crate::error::Error;
use crate::ptr::ConstPtr;

/// The longest digest name [`Descriptor::by_name`] will look up, in bytes.
///
/// Names are copied into a NUL terminated stack buffer for the lookup, so no allocation takes
/// place. Every name libcrypto registers is far below this.
pub const MAX_NAME_LEN: usize = 63;

/// An opaque handle to a digest implementation within libcrypto.
///
/// # Example
///
/// ```
/// use evp_digest::{Descriptor, Error};
///
/// assert!(Descriptor::by_name("sha256").is_ok());
/// assert_eq!(Descriptor::by_name("not-a-digest"), Err(Error::AlgorithmNotFound));
/// ```
#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct Descriptor {
    inner: ConstPtr<EVP_MD>
}

impl Descriptor {
    /// Resolve a digest by name, for example `"SHA256"`, `"sha3-256"` or `"blake2b512"`.
    ///
    /// Whether the lookup is case-sensitive is up to libcrypto. OpenSSL registers both the
    /// short name (`SHA256`) and the long name (`sha256`) of each digest, and from 3.0 onwards
    /// compares names case-insensitively.
    ///
    /// # Errors
    ///
    /// [`Error::AlgorithmNotFound`] if libcrypto does not know the name, or if the name is
    /// empty, longer than [`MAX_NAME_LEN`], or contains a NUL byte.
    pub fn by_name(name: &str) -> Result<Self, Error> {
        let bytes = name.as_bytes();

        if bytes.is_empty() || bytes.len() > MAX_NAME_LEN || bytes.contains(&0) {
            debug!(len = bytes.len(), "rejected malformed digest name");
            return Err(Error::AlgorithmNotFound);
        }

        let mut c_name = [0u8; MAX_NAME_LEN + 1];
        c_name[..bytes.len()].copy_from_slice(bytes);

        evp_digest_sys::init();

        // SAFETY: `c_name` is NUL terminated as it is one byte longer than any accepted name,
        // the returned pointer is owned by libcrypto and lives for the rest of the process.
        let md = unsafe { EVP_get_digestbyname(c_name.as_ptr().cast()) };

        match ConstPtr::new(md) {
            Some(inner) => {
                trace!(digest = name, "resolved digest");
                Ok(Self { inner })
            },
            None => {
                debug!(digest = name, "unknown digest");
                Err(Error::AlgorithmNotFound)
            }
        }
    }

    /// Resolve one of the [`Algorithm`]s this crate knows by name.
    ///
    /// # Errors
    ///
    /// [`Error::AlgorithmNotFound`] if the linked libcrypto does not provide the algorithm.
    #[inline]
    pub fn from_algorithm(algorithm: Algorithm) -> Result<Self, Error> {
        Self::by_name(algorithm.name())
    }

    /// Wraps a raw `EVP_MD`, `None` if `md` is null.
    ///
    /// # Safety
    ///
    /// A non-null `md` must be an `EVP_MD` obtained from libcrypto which outlives every use of
    /// the returned descriptor.
    #[inline]
    pub unsafe fn from_raw(md: *const EVP_MD) -> Option<Self> {
        ConstPtr::new(md).map(|inner| Self { inner })
    }

    /// The underlying `EVP_MD`.
    #[inline]
    pub const fn as_ptr(&self) -> *const EVP_MD {
        self.inner.get()
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Descriptor").field(&self.inner).finish()
    }
}

impl TryFrom<Algorithm> for Descriptor {
    type Error = Error;

    #[inline]
    fn try_from(value: Algorithm) -> Result<Self, Self::Error> {
        Self::from_algorithm(value)
    }
}

// SAFETY:
// An `EVP_MD` is an immutable, process lifetime table entry within libcrypto. It is never
// mutated through a descriptor, and libcrypto documents concurrent use as safe.
unsafe impl Send for Descriptor {}

// SAFETY: See above, there is no interior mutability.
unsafe impl Sync for Descriptor {}

macro_rules! make_algorithms {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $name:literal, size: $size:expr
        );* $(;)?
    ) => {
        /// The digest algorithms known by name to this crate.
        ///
        /// Which of these are usable depends on the linked libcrypto, legacy algorithms such as
        /// `md4` or `mdc2` are commonly unavailable. For any other algorithm use
        /// [`Descriptor::by_name`] directly.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Algorithm {
            $(
                $(#[$meta])*
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl Algorithm {
            /// Every known algorithm.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// The name this algorithm is resolved by.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// The size of the digest in bytes, `None` for extendable output functions.
            pub const fn digest_size(self) -> Option<usize> {
                match self {
                    $(Self::$variant => $size,)*
                }
            }
        }
    };
}

make_algorithms! {
    Blake2b512 => "blake2b512", size: Some(64);
    Blake2s256 => "blake2s256", size: Some(32);
    /// Broken, only for interoperability with legacy systems.
    Md4 => "md4", size: Some(16);
    /// Broken, only for interoperability with legacy systems.
    Md5 => "md5", size: Some(16);
    Mdc2 => "mdc2", size: Some(16);
    Rmd160 => "rmd160", size: Some(20);
    /// Broken, only for interoperability with legacy systems.
    Sha1 => "sha1", size: Some(20);
    Sha224 => "sha224", size: Some(28);
    Sha256 => "sha256", size: Some(32);
    Sha3_224 => "sha3-224", size: Some(28);
    Sha3_256 => "sha3-256", size: Some(32);
    Sha3_384 => "sha3-384", size: Some(48);
    Sha3_512 => "sha3-512", size: Some(64);
    Sha384 => "sha384", size: Some(48);
    Sha512 => "sha512", size: Some(64);
    Sha512_224 => "sha512-224", size: Some(28);
    Sha512_256 => "sha512-256", size: Some(32);
    Shake128 => "shake128", size: None;
    Shake256 => "shake256", size: None;
    Sm3 => "sm3", size: Some(32);
}

impl Algorithm {
    /// `true` for the extendable output functions (`shake128`, `shake256`).
    #[inline]
    pub const fn is_xof(self) -> bool {
        self.digest_size().is_none()
    }

    /// Shorthand for [`Descriptor::from_algorithm`].
    ///
    /// # Errors
    ///
    /// [`Error::AlgorithmNotFound`] if the linked libcrypto does not provide the algorithm.
    #[inline]
    pub fn descriptor(self) -> Result<Descriptor, Error> {
        Descriptor::from_algorithm(self)
    }
}

impl fmt::Display for Algorithm {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Case-insensitive match against [`Algorithm::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
            .copied()
            .find(|algo| algo.name().eq_ignore_ascii_case(s))
            .ok_or(Error::AlgorithmNotFound)
    }
}
