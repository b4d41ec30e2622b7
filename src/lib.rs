#![warn(missing_docs)]
#![no_std]

//! Stream layer for NMEA 2000 messaging stacks
//!
//! Marine electronics firmware moves its text side-channel (device status,
//! bus diagnostics, raw message dumps) over whatever link the hardware
//! happens to have: a UART, a socket, or a UDP tunnel. This crate defines
//! the minimal byte stream contract that the protocol layers program
//! against, plus the formatting helpers built on top of it: printing
//! strings, printing integers in any radix from 2 to 16, and terminating
//! lines with the fixed `\r\n` the message format expects on every platform.
//!
//! The contract is two operations: [`Stream::write`] hands bytes to the
//! transport and reports how many were accepted, [`Stream::read`] returns
//! one byte of pending input or `None`. Absence of data and short writes are
//! normal outcomes, not errors; nothing in this layer panics or aborts.
//!
//! Datagram links get the [`datagram`] module, which batches writes into
//! whole packets behind the same contract. Serial ports implementing the
//! `embedded-hal` traits are covered by the `embedded-hal-traits` feature.

#[cfg(feature = "std")]
extern crate std;

pub mod datagram;
pub mod traits;

use self::traits::Stream;

/// An implementation of [Stream] backed by plain memory. Output goes to a
/// backing `&mut [u8]`, input is popped from an optional `&[u8]`.
pub struct BufferStream<'a> {
    output: &'a mut [u8],
    written: usize,
    input: &'a [u8],
}

impl<'a> BufferStream<'a> {
    /// Create a write-only stream with a backing output buffer.
    pub fn new(output: &'a mut [u8]) -> Self {
        Self {
            output,
            written: 0,
            input: &[],
        }
    }

    /// Create a stream that also serves `input` back through [Stream::read].
    pub fn with_input(output: &'a mut [u8], input: &'a [u8]) -> Self {
        Self {
            output,
            written: 0,
            input,
        }
    }

    /// The bytes count written to the backing buffer.
    pub fn written_len(&self) -> usize {
        self.written
    }

    /// A slice of the backing buffer holding everything written so far.
    /// ```
    /// use n2k_stream::traits::Stream;
    /// use n2k_stream::BufferStream;
    ///
    /// let mut buffer = [0u8; 16];
    /// let mut stream = BufferStream::new(&mut buffer);
    /// stream.println("Ahoy");
    /// assert_eq!(stream.written_buffer(), b"Ahoy\r\n");
    /// ```
    pub fn written_buffer(&self) -> &[u8] {
        &self.output[..self.written]
    }
}

impl Stream for BufferStream<'_> {
    fn write(&mut self, data: &[u8]) -> usize {
        // A full buffer reports a short count, like any backpressured
        // transport.
        let space = self.output.len() - self.written;
        let accepted = data.len().min(space);
        self.output[self.written..self.written + accepted].copy_from_slice(&data[..accepted]);
        self.written += accepted;
        accepted
    }

    fn read(&mut self) -> Option<u8> {
        let (&byte, rest) = self.input.split_first()?;
        self.input = rest;
        Some(byte)
    }
}
