//! Non-null handles to libcrypto objects.
//!
//! Every handle libcrypto gives us is checked for null exactly once, at construction, so the
//! rest of the crate never deals with nullable pointers.
use core::fmt;
use core::ptr::NonNull;

/// An exclusively owned, non-null pointer. Freeing is the owner's responsibility.
#[repr(transparent)]
pub struct MutPtr<T> {
    inner: NonNull<T>
}

impl<T> MutPtr<T> {
    #[inline]
    pub fn new(inner: *mut T) -> Option<Self> {
        NonNull::new(inner).map(|inner| Self { inner })
    }

    #[inline]
    pub const fn get(&self) -> *mut T {
        self.inner.as_ptr()
    }
}

impl<T> fmt::Debug for MutPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MutPtr({:p})", self.inner)
    }
}

/// A shared, non-null pointer to an immutable object owned by libcrypto.
#[repr(transparent)]
pub struct ConstPtr<T> {
    inner: NonNull<T>
}

impl<T> ConstPtr<T> {
    #[inline]
    pub fn new(inner: *const T) -> Option<Self> {
        NonNull::new(inner.cast_mut()).map(|inner| Self { inner })
    }

    #[inline]
    pub const fn get(&self) -> *const T {
        self.inner.as_ptr().cast_const()
    }
}

impl<T> Clone for ConstPtr<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ConstPtr<T> {}

impl<T> PartialEq for ConstPtr<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Eq for ConstPtr<T> {}

impl<T> fmt::Debug for ConstPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ConstPtr({:p})", self.inner)
    }
}
