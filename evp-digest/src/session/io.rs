//! Feeding a [`Session`] through `Write`.
//!
//! Every write is a single [`Session::update`] and always consumes the whole buffer, so
//! `io::copy` and friends can stream a reader straight into a digest.
use super::Session;

std! {
    use std::io as std_io;

    impl std_io::Write for Session {
        #[inline]
        fn write(&mut self, buf: &[u8]) -> std_io::Result<usize> {
            self.update(buf)
                .map(|()| buf.len())
                .map_err(std_io::Error::other)
        }

        #[inline]
        fn write_all(&mut self, buf: &[u8]) -> std_io::Result<()> {
            self.update(buf).map_err(std_io::Error::other)
        }

        #[inline]
        fn flush(&mut self) -> std_io::Result<()> {
            Ok(())
        }
    }
}

eio! {
    use embedded_io::{self as eio, ErrorType};
    use crate::error::Error;

    impl ErrorType for Session {
        type Error = Error;
    }

    impl eio::Write for Session {
        #[inline]
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.update(buf).map(|()| buf.len())
        }

        #[inline]
        fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.update(buf)
        }

        #[inline]
        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }
}
