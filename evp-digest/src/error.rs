use core::ffi::c_int;
use core::fmt;

/// The ways a digest operation can fail.
///
/// Failures reported by libcrypto itself are surfaced as [`Provider`] without further
/// interpretation, this crate performs no recovery or retries.
///
/// [`Provider`]: Error::Provider
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Error {
    /// The provider does not know a digest by the requested name.
    AlgorithmNotFound,
    /// The provider could not allocate a digest context.
    AllocationFailure,
    /// The operation was called out of lifecycle order, for example `update` after `finalize`
    /// without re-initializing.
    InvalidState,
    /// An opaque failure reported by libcrypto.
    Provider,
    /// The output buffer cannot hold the digest.
    OutputTooSmall,
}

impl Error {
    /// Status code used by the C interface for success.
    pub const OK_CODE: c_int = 1;

    /// The status code representing this error in the C interface.
    ///
    /// Every error maps to a distinct negative value, success is [`OK_CODE`].
    ///
    /// [`OK_CODE`]: Self::OK_CODE
    #[inline]
    pub const fn code(self) -> c_int {
        match self {
            Self::AlgorithmNotFound => -1,
            Self::AllocationFailure => -2,
            Self::InvalidState => -3,
            Self::Provider => -4,
            Self::OutputTooSmall => -5,
        }
    }

    /// Inverse of [`code`], `None` for success or unknown values.
    ///
    /// [`code`]: Self::code
    pub const fn from_code(code: c_int) -> Option<Self> {
        match code {
            -1 => Some(Self::AlgorithmNotFound),
            -2 => Some(Self::AllocationFailure),
            -3 => Some(Self::InvalidState),
            -4 => Some(Self::Provider),
            -5 => Some(Self::OutputTooSmall),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::AlgorithmNotFound => "AlgorithmNotFound",
            Self::AllocationFailure => "AllocationFailure",
            Self::InvalidState => "InvalidState",
            Self::Provider => "ProviderInternalError",
            Self::OutputTooSmall => "OutputTooSmall",
        }
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

std! { impl std::error::Error for Error {} }

eio! {
    impl embedded_io::Error for Error {
        #[inline]
        fn kind(&self) -> embedded_io::ErrorKind {
            embedded_io::ErrorKind::Other
        }
    }
}
