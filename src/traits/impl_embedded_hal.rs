use super::Stream;
use embedded_hal::serial;

// note: a newtype instead of a blanket impl, so that local stream types and
// the serial impl can never collide under coherence.

/// Adapter exposing an embedded-hal serial port as a [Stream].
///
/// Reads map `nb::Error::WouldBlock` to the "no data" sentinel. Device
/// errors are folded into the same sentinel on the read side and into a
/// short count on the write side; the stream contract has no error channel
/// to carry them further.
pub struct SerialStream<T>(pub T);

impl<T> Stream for SerialStream<T>
where
    T: serial::Read<u8> + serial::Write<u8>,
{
    fn write(&mut self, data: &[u8]) -> usize {
        for (count, byte) in data.iter().enumerate() {
            if nb::block!(serial::Write::write(&mut self.0, *byte)).is_err() {
                return count;
            }
        }
        data.len()
    }

    fn read(&mut self) -> Option<u8> {
        serial::Read::read(&mut self.0).ok()
    }
}
