/// Line terminator emitted by every `println` style operation.
///
/// This is a wire constant of the messaging format's text side-channel, not
/// an OS convention: the two bytes `0x0D 0x0A` are sent on every platform.
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A transport that can move raw bytes. This is the only capability the
/// formatting layer needs, so anything implementing it (a UART register
/// pair, a socket, a datagram adapter, a plain buffer) gets `print` and
/// `println` for free.
///
/// The contract has no error channel. `read` signals "nothing pending" with
/// `None` and must not block waiting for data; `write` reports how many
/// bytes the transport accepted, which may be fewer than offered. Callers
/// decide whether a short count is worth retrying. Handles are single-owner:
/// sharing one stream between threads has to be serialized by the caller.
pub trait Stream {
    /// Attempt to transmit all of `data`, returning the number of bytes the
    /// transport actually accepted. Whether this blocks is up to the
    /// transport.
    fn write(&mut self, data: &[u8]) -> usize;

    /// The next byte of pending input, or `None` when no data is currently
    /// available. Never waits for data to arrive.
    fn read(&mut self) -> Option<u8>;

    /// Drain pending input into `buf`, stopping at the first `None`.
    /// Returns the number of bytes stored.
    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read() {
                Some(byte) => {
                    buf[filled] = byte;
                    filled += 1;
                }
                None => break,
            }
        }
        filled
    }

    /// Write a string without a terminator. Empty text performs no I/O and
    /// returns 0; otherwise the return value is the transport's accepted
    /// count for the string's bytes.
    fn print(&mut self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.write(text.as_bytes())
    }

    /// Write `val` as text in the given radix.
    ///
    /// The radix is clamped into `2..=16`. Negative values print a leading
    /// `-` followed by the magnitude; the digit alphabet is lowercase
    /// `0123456789abcdef`.
    fn print_int(&mut self, val: i32, radix: u8) -> usize {
        if val == 0 {
            // 0 is always 0 regardless of radix.
            return self.write(b"0");
        }

        let radix = u32::from(radix.clamp(2, 16));

        // Enough for a binary rendering plus the sign.
        let mut buf = [0u8; 33];
        let mut pos = buf.len();
        let mut rest = val.unsigned_abs();

        while rest != 0 {
            pos -= 1;
            buf[pos] = DIGITS[(rest % radix) as usize];
            rest /= radix;
        }
        if val < 0 {
            pos -= 1;
            buf[pos] = b'-';
        }

        self.write(&buf[pos..])
    }

    /// Write a string followed by the line terminator. Returns the bytes
    /// accepted for both pieces together.
    fn println(&mut self, text: &str) -> usize {
        let written = self.print(text);
        written + self.write(LINE_TERMINATOR)
    }

    /// Write `val` as text in the given radix, followed by the line
    /// terminator.
    fn println_int(&mut self, val: i32, radix: u8) -> usize {
        let written = self.print_int(val, radix);
        written + self.write(LINE_TERMINATOR)
    }

    /// Write text pulled one byte at a time from `src`. Each byte is handed
    /// to the transport as its own write, so sources that cannot expose a
    /// contiguous slice (text kept in a separate flash address space, for
    /// one) need no staging buffer.
    fn print_from(&mut self, src: &mut dyn ByteSource) -> usize {
        let mut written = 0;
        while let Some(byte) = src.next_byte() {
            written += self.write(&[byte]);
        }
        written
    }

    /// Like [print_from](Stream::print_from), followed by the line
    /// terminator.
    fn println_from(&mut self, src: &mut dyn ByteSource) -> usize {
        let written = self.print_from(src);
        written + self.write(LINE_TERMINATOR)
    }
}

/// A text source that yields its bytes one at a time.
///
/// Implemented for every `Iterator<Item = u8>`, so `str::bytes` works
/// directly. Program-memory strings on Harvard architecture parts implement
/// this with their per-byte load instead.
pub trait ByteSource {
    /// The next byte of the text, or `None` at the end.
    fn next_byte(&mut self) -> Option<u8>;
}

impl<I: Iterator<Item = u8>> ByteSource for I {
    fn next_byte(&mut self) -> Option<u8> {
        self.next()
    }
}
