//! Safe and thin streaming digest sessions over OpenSSL's `EVP` message digest API.
//!
//! ```
//! use evp_digest::{Descriptor, Session};
//!
//! let sha256 = Descriptor::by_name("SHA256").unwrap();
//! let mut session = Session::with_descriptor(&sha256).unwrap();
//!
//! session.update(b"abc").unwrap();
//! let digest = session.finalize().unwrap();
//!
//! assert_eq!(
//!     digest.to_string(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(
    clippy::pedantic,
    clippy::nursery,
    clippy::all
)]
// lengths reported by libcrypto are `c_uint`, always checked against `MAX_DIGEST_SIZE`.
#![allow(clippy::cast_possible_truncation)]
// stupid lint IMO
#![allow(clippy::module_name_repetitions)]
// this devalues things which actually require the must-use attribute
#![allow(clippy::must_use_candidate)]
// I don't need a linter lecturing me on performance
#![allow(clippy::inline_always)]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[macro_use]
mod macros;

mod ptr;
mod opaque_res;
mod error;

pub mod algorithm;
pub mod digest;
pub mod session;

#[cfg(feature = "capi")]
#[cfg_attr(docsrs, doc(cfg(feature = "capi")))]
pub mod capi;

pub use error::Error;
pub use algorithm::{Algorithm, Descriptor};
pub use digest::{Digest, MAX_DIGEST_SIZE};
pub use session::{digest, Session, State};
