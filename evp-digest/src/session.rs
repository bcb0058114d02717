//! Digest Sessions
//!
//! A [`Session`] owns one `EVP_MD_CTX` and sequences its lifecycle:
//!
//! ```text
//! Uninitialized -> Initialized -> Updating -> Finalized
//! ```
//!
//! `update` loops on `Updating`, `init` is valid from every state and discards whatever was in
//! progress. Anything else out of order fails with [`Error::InvalidState`] before libcrypto is
//! touched. Releasing the context is done by dropping the session.
use core::ffi::c_uint;
use core::ptr;
use evp_digest_sys::{
    EVP_MD_CTX,
    EVP_MD_CTX_new, EVP_MD_CTX_free,
    EVP_DigestInit_ex, EVP_DigestUpdate,
    EVP_DigestFinal_ex, EVP_DigestFinalXOF,
};
use zeroize::Zeroize;
use crate::algorithm::Descriptor;
use crate::digest::{Digest, MAX_DIGEST_SIZE};
use crate::error::Error;
use crate::opaque_res::Res;
use crate::ptr::MutPtr;

mod io;

/// Where a [`Session`] is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// Created, not yet bound to an algorithm.
    Uninitialized,
    /// Bound to an algorithm, nothing fed yet.
    Initialized,
    /// At least one `update` went through.
    Updating,
    /// The digest was produced, only `init` is allowed.
    Finalized,
}

impl State {
    #[inline]
    const fn accepts_input(self) -> bool {
        matches!(self, Self::Initialized | Self::Updating)
    }
}

/// A streaming digest computation backed by an `EVP_MD_CTX`.
///
/// # Example
///
/// ```
/// use evp_digest::{Descriptor, Session, Error};
///
/// let sha256 = Descriptor::by_name("SHA256").unwrap();
///
/// let mut session = Session::new().unwrap();
/// session.init(&sha256).unwrap();
///
/// session.update(b"a").unwrap();
/// session.update(b"bc").unwrap();
///
/// let digest = session.finalize().unwrap();
/// assert_eq!(
///     digest.to_string(),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
///
/// // finalized, must re-initialize before hashing anything else.
/// assert_eq!(session.update(b"abc"), Err(Error::InvalidState));
/// ```
pub struct Session {
    ctx: MutPtr<EVP_MD_CTX>,
    md: Option<Descriptor>,
    state: State
}

impl Session {
    /// Allocate a new, uninitialized session.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if libcrypto could not allocate the context.
    pub fn new() -> Result<Self, Error> {
        evp_digest_sys::init();

        // SAFETY: No preconditions, a null return is handled below.
        let ctx = unsafe { EVP_MD_CTX_new() };

        MutPtr::new(ctx).map_or_else(
            || {
                debug!("EVP_MD_CTX_new failed");
                Err(Error::AllocationFailure)
            },
            |ctx| {
                trace!("created digest session");
                Ok(Self { ctx, md: None, state: State::Uninitialized })
            }
        )
    }

    /// Allocate a new session and [`init`] it with `md`.
    ///
    /// # Errors
    ///
    /// See [`new`] and [`init`].
    ///
    /// [`new`]: Self::new
    /// [`init`]: Self::init
    #[inline]
    pub fn with_descriptor(md: &Descriptor) -> Result<Self, Error> {
        let mut session = Self::new()?;
        session.init(md)?;
        Ok(session)
    }

    /// Bind the session to `md`, discarding any computation in progress.
    ///
    /// Valid in every state, this is also how a finalized session is reused.
    ///
    /// # Errors
    ///
    /// [`Error::Provider`] if `EVP_DigestInit_ex` fails, for example when the algorithm is
    /// known by name but not available from any loaded provider. The session is then
    /// [`State::Uninitialized`].
    pub fn init(&mut self, md: &Descriptor) -> Result<(), Error> {
        let mut res = Res::new();

        // SAFETY: `ctx` is a live context we exclusively own, `md` is a valid `EVP_MD`. No
        // engine is passed.
        res.ensure_1(unsafe {
            EVP_DigestInit_ex(self.ctx.get(), md.as_ptr(), ptr::null_mut())
        });

        if res.is_ok() {
            trace!("initialized digest session");
            self.md = Some(*md);
            self.state = State::Initialized;
        } else {
            debug!("EVP_DigestInit_ex failed");
            self.md = None;
            self.state = State::Uninitialized;
        }

        res.into_result((), Error::Provider)
    }

    #[inline]
    fn ensure_accepting(&self) -> Result<(), Error> {
        if self.state.accepts_input() {
            Ok(())
        } else {
            debug!(state = ?self.state, "digest session used out of order");
            Err(Error::InvalidState)
        }
    }

    /// Feed `data` into the running digest.
    ///
    /// The digest is computed over the concatenation of every chunk, in call order.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidState`] if the session is not initialized or already finalized.
    /// - [`Error::Provider`] if `EVP_DigestUpdate` fails.
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        self.ensure_accepting()?;

        let mut res = Res::new();

        // SAFETY: `data` is valid for `data.len()` bytes, libcrypto only reads from it.
        res.ensure_1(unsafe {
            EVP_DigestUpdate(self.ctx.get(), data.as_ptr().cast(), data.len())
        });

        if res.is_ok() {
            trace!(len = data.len(), "digest update");
            self.state = State::Updating;
        }

        res.into_result((), Error::Provider)
    }

    /// Produce the digest of everything fed since [`init`].
    ///
    /// The session is [`State::Finalized`] afterwards, regardless of the outcome, as libcrypto
    /// leaves the context unusable either way.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidState`] if the session is not initialized or already finalized.
    /// - [`Error::Provider`] if `EVP_DigestFinal_ex` fails.
    ///
    /// [`init`]: Self::init
    pub fn finalize(&mut self) -> Result<Digest, Error> {
        self.ensure_accepting()?;

        let mut buf = [0u8; MAX_DIGEST_SIZE];
        let mut len: c_uint = 0;
        let mut res = Res::new();

        // SAFETY: `buf` holds `EVP_MAX_MD_SIZE` bytes, the most any `EVP_DigestFinal_ex` call
        // writes.
        res.ensure_1(unsafe {
            EVP_DigestFinal_ex(self.ctx.get(), buf.as_mut_ptr(), &mut len)
        });
        res.check(len as usize <= MAX_DIGEST_SIZE);

        self.state = State::Finalized;
        trace!(len, ok = res.is_ok(), "digest finalized");

        res.into_result_with(|| Digest::new(buf, len as usize), Error::Provider)
    }

    /// Like [`finalize`], writing the digest into `output`.
    ///
    /// # Returns
    ///
    /// The length of the digest, only `output[..len]` is written.
    ///
    /// # Errors
    ///
    /// - [`Error::OutputTooSmall`] if `output` cannot hold the digest. The session is still
    ///   finalized, the digest is discarded.
    /// - Anything [`finalize`] returns.
    ///
    /// [`finalize`]: Self::finalize
    pub fn finalize_into(&mut self, output: &mut [u8]) -> Result<usize, Error> {
        let mut digest = self.finalize()?;
        let len = digest.len();

        let res = output.get_mut(..len).map_or(Err(Error::OutputTooSmall), |out| {
            out.copy_from_slice(digest.as_slice());
            Ok(len)
        });

        digest.zeroize();
        res
    }

    /// Squeeze `output.len()` bytes out of an extendable output function (`shake128`,
    /// `shake256`).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidState`] if the session is not initialized or already finalized.
    /// - [`Error::Provider`] if `EVP_DigestFinalXOF` fails. Whether a fixed output algorithm
    ///   is rejected here is up to libcrypto. The session is finalized in that case as well.
    pub fn finalize_xof(&mut self, output: &mut [u8]) -> Result<(), Error> {
        self.ensure_accepting()?;

        let mut res = Res::new();

        // SAFETY: `output` is valid for writes of `output.len()` bytes.
        res.ensure_1(unsafe {
            EVP_DigestFinalXOF(self.ctx.get(), output.as_mut_ptr(), output.len())
        });

        self.state = State::Finalized;
        trace!(len = output.len(), ok = res.is_ok(), "xof finalized");

        res.into_result((), Error::Provider)
    }

    /// The current lifecycle state.
    #[inline]
    pub const fn state(&self) -> State {
        self.state
    }

    /// The algorithm the session was last initialized with.
    #[inline]
    pub const fn descriptor(&self) -> Option<Descriptor> {
        self.md
    }

    /// Release the session and its `EVP_MD_CTX`.
    ///
    /// Equivalent to dropping the session, provided for explicitness.
    ///
    /// The session is moved, any later use is a compile error:
    ///
    /// ```compile_fail
    /// use evp_digest::{Algorithm, Session};
    ///
    /// let md = Algorithm::Sha256.descriptor().unwrap();
    /// let mut session = Session::with_descriptor(&md).unwrap();
    ///
    /// session.release();
    /// session.update(b"x").unwrap();
    /// ```
    ///
    /// The same holds for a dropped session:
    ///
    /// ```compile_fail
    /// use evp_digest::{Algorithm, Session};
    ///
    /// let md = Algorithm::Sha256.descriptor().unwrap();
    /// let mut session = Session::with_descriptor(&md).unwrap();
    ///
    /// drop(session);
    /// session.update(b"x").unwrap();
    /// ```
    ///
    /// Releasing twice does not compile either:
    ///
    /// ```compile_fail
    /// use evp_digest::{Algorithm, Session};
    ///
    /// let md = Algorithm::Sha256.descriptor().unwrap();
    /// let session = Session::with_descriptor(&md).unwrap();
    ///
    /// session.release();
    /// session.release();
    /// ```
    #[inline]
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Session {
    /// Calls `EVP_MD_CTX_free`, cleaning up after itself.
    #[inline]
    fn drop(&mut self) {
        trace!("released digest session");
        // SAFETY: `ctx` came from `EVP_MD_CTX_new` and, as drop runs exactly once, is freed
        // exactly once.
        unsafe { EVP_MD_CTX_free(self.ctx.get()) }
    }
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("md", &self.md)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// SAFETY:
// All methods which mutate the underlying context require a mutable reference, and the context
// is exclusively owned, so moving it to another thread moves all access with it.
unsafe impl Send for Session {}

// SAFETY:
// There is no providing of interior mutability, all methods which touch the underlying context
// require a mutable reference, thus making this safe to mark `Sync`.
unsafe impl Sync for Session {}

/// Hash `data` in one go.
///
/// # Errors
///
/// See [`Session::with_descriptor`], [`Session::update`] and [`Session::finalize`].
///
/// # Example
///
/// ```
/// use evp_digest::{digest, Algorithm};
///
/// let md = Algorithm::Sha256.descriptor().unwrap();
/// let out = digest(&md, b"abc").unwrap();
///
/// assert_eq!(out.len(), 32);
/// ```
pub fn digest(md: &Descriptor, data: &[u8]) -> Result<Digest, Error> {
    let mut session = Session::with_descriptor(md)?;
    session.update(data)?;
    session.finalize()
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use sha2::Digest as _;
    use hex_literal::hex;

    fn sha256() -> Descriptor {
        Algorithm::Sha256.descriptor().unwrap()
    }

    #[test]
    fn new_is_uninitialized() {
        let session = Session::new().unwrap();
        assert_eq!(session.state(), State::Uninitialized);
        assert_eq!(session.descriptor(), None);
    }

    #[test]
    fn sha256_empty() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();
        let out = session.finalize().unwrap();

        assert_eq!(
            out,
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn sha256_abc() {
        let mut session = Session::new().unwrap();
        session.init(&sha256()).unwrap();
        session.update(b"abc").unwrap();

        assert_eq!(
            session.finalize().unwrap(),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn state_transitions() {
        let mut session = Session::new().unwrap();
        session.init(&sha256()).unwrap();
        assert_eq!(session.state(), State::Initialized);
        assert_eq!(session.descriptor(), Some(sha256()));

        session.update(b"hello").unwrap();
        assert_eq!(session.state(), State::Updating);
        session.update(b" world").unwrap();
        assert_eq!(session.state(), State::Updating);

        session.finalize().unwrap();
        assert_eq!(session.state(), State::Finalized);
    }

    #[test]
    fn update_before_init() {
        let mut session = Session::new().unwrap();
        assert_eq!(session.update(b"hello"), Err(Error::InvalidState));
        assert_eq!(session.state(), State::Uninitialized);
    }

    #[test]
    fn finalize_before_init() {
        let mut session = Session::new().unwrap();
        assert_eq!(session.finalize(), Err(Error::InvalidState));

        let mut out = [0u8; 64];
        assert_eq!(session.finalize_into(&mut out), Err(Error::InvalidState));
        assert_eq!(session.finalize_xof(&mut out), Err(Error::InvalidState));
    }

    #[test]
    fn update_after_finalize() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();
        session.update(b"hello").unwrap();
        session.finalize().unwrap();

        assert_eq!(session.update(b"hello"), Err(Error::InvalidState));
    }

    #[test]
    fn double_finalize() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();
        session.finalize().unwrap();

        assert_eq!(session.finalize(), Err(Error::InvalidState));
    }

    #[test]
    fn reinit_after_finalize() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();
        session.update(b"hello world").unwrap();
        let first = session.finalize().unwrap();

        session.init(&sha256()).unwrap();
        session.update(b"hello world").unwrap();
        let second = session.finalize().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn reinit_discards_progress() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();
        session.update(b"discarded").unwrap();

        session.init(&sha256()).unwrap();
        session.update(b"abc").unwrap();

        assert_eq!(
            session.finalize().unwrap(),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn reinit_with_other_algorithm() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();
        session.update(b"abc").unwrap();

        let sha512 = Algorithm::Sha512.descriptor().unwrap();
        session.init(&sha512).unwrap();
        session.update(b"abc").unwrap();

        let out = session.finalize().unwrap();
        assert_eq!(out.len(), 64);
        assert_eq!(out.as_slice(), sha2::Sha512::digest(b"abc").as_slice());
    }

    #[test]
    fn empty_updates_are_noops() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();
        session.update(&[]).unwrap();
        session.update(b"abc").unwrap();
        session.update(&[]).unwrap();

        assert_eq!(
            session.finalize().unwrap(),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn finalize_into_exact() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();
        session.update(b"abc").unwrap();

        let mut out = [0u8; 32];
        assert_eq!(session.finalize_into(&mut out), Ok(32));
        assert_eq!(
            out,
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn finalize_into_larger_buffer() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();

        let mut out = [0xffu8; 48];
        assert_eq!(session.finalize_into(&mut out), Ok(32));
        assert_eq!(out[32..], [0xffu8; 16]);
    }

    #[test]
    fn finalize_into_too_small() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();
        session.update(b"abc").unwrap();

        let mut out = [0u8; 31];
        assert_eq!(session.finalize_into(&mut out), Err(Error::OutputTooSmall));
        assert_eq!(out, [0u8; 31]);
        assert_eq!(session.state(), State::Finalized);
    }

    #[test]
    fn xof_lengths() {
        let shake = Algorithm::Shake256.descriptor().unwrap();

        for len in [1usize, 32, 64, 200] {
            let mut session = Session::with_descriptor(&shake).unwrap();
            session.update(b"hello world").unwrap();

            let mut out = vec![0u8; len];
            session.finalize_xof(&mut out).unwrap();

            let mut expected = vec![0u8; len];
            {
                use sha3::digest::{ExtendableOutput, Update, XofReader};
                let mut rc = sha3::Shake256::default();
                rc.update(b"hello world");
                rc.finalize_xof().read(&mut expected);
            }

            assert_eq!(out, expected, "len {len}");
        }
    }

    #[test]
    fn one_shot() {
        assert_eq!(
            digest(&sha256(), b"abc").unwrap(),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn release_explicitly() {
        let session = Session::with_descriptor(&sha256()).unwrap();
        session.release();
    }

    #[test]
    fn many_sessions_one_descriptor() {
        let md = sha256();
        let mut a = Session::with_descriptor(&md).unwrap();
        let mut b = Session::with_descriptor(&md).unwrap();

        a.update(b"hello").unwrap();
        b.update(b"goodbye").unwrap();
        a.update(b" world").unwrap();

        assert_eq!(a.finalize().unwrap().as_slice(), sha2::Sha256::digest(b"hello world").as_slice());
        assert_eq!(b.finalize().unwrap().as_slice(), sha2::Sha256::digest(b"goodbye").as_slice());
    }

    #[test]
    fn session_moves_across_threads() {
        let mut session = Session::with_descriptor(&sha256()).unwrap();
        session.update(b"a").unwrap();

        let out = std::thread::spawn(move || {
            session.update(b"bc").unwrap();
            session.finalize().unwrap()
        }).join().unwrap();

        assert_eq!(
            out,
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn hash_one_mb() {
        // probably do not want to put this on the stack
        let input = vec![7u8; 1_048_576];

        let out = digest(&sha256(), &input).unwrap();
        assert_eq!(out.as_slice(), sha2::Sha256::digest(&input).as_slice());
    }

    macro_rules! rust_crypto_equivalence {
        ($($test:ident: $algo:ident => $rc:ty),* $(,)?) => {
            $(
                #[test]
                fn $test() {
                    let md = Algorithm::$algo.descriptor().unwrap();

                    let inputs: [&[u8]; 3] = [b"", b"hello world", &[7u8; 32_768]];

                    for input in inputs {
                        let out = digest(&md, input).unwrap();
                        let rc_out = <$rc>::digest(input);

                        assert_eq!(out.as_slice(), rc_out.as_slice());
                        assert_eq!(Some(out.len()), Algorithm::$algo.digest_size());
                    }
                }
            )*
        };
    }

    rust_crypto_equivalence! {
        rust_crypto_md5: Md5 => md5::Md5,
        rust_crypto_sha1: Sha1 => sha1::Sha1,
        rust_crypto_sha224: Sha224 => sha2::Sha224,
        rust_crypto_sha256: Sha256 => sha2::Sha256,
        rust_crypto_sha384: Sha384 => sha2::Sha384,
        rust_crypto_sha512: Sha512 => sha2::Sha512,
        rust_crypto_sha512_224: Sha512_224 => sha2::Sha512_224,
        rust_crypto_sha512_256: Sha512_256 => sha2::Sha512_256,
        rust_crypto_sha3_224: Sha3_224 => sha3::Sha3_224,
        rust_crypto_sha3_256: Sha3_256 => sha3::Sha3_256,
        rust_crypto_sha3_384: Sha3_384 => sha3::Sha3_384,
        rust_crypto_sha3_512: Sha3_512 => sha3::Sha3_512,
        rust_crypto_blake2b512: Blake2b512 => blake2::Blake2b512,
        rust_crypto_blake2s256: Blake2s256 => blake2::Blake2s256,
    }
}
