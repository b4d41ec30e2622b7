//! The stream contract and its platform specializations.

mod stream;

#[cfg(feature = "embedded-hal")]
mod impl_embedded_hal;

pub use self::stream::{ByteSource, Stream, LINE_TERMINATOR};

#[cfg(feature = "embedded-hal")]
pub use self::impl_embedded_hal::SerialStream;
