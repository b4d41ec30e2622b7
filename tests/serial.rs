#![cfg(feature = "embedded-hal-traits")]

use std::collections::VecDeque;

use embedded_hal::serial;
use n2k_stream::traits::{SerialStream, Stream};

/// Serial device double: queued rx bytes, recorded tx bytes, and an
/// optional point at which the transmitter starts erroring.
struct FakeSerial {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    tx_fail_after: Option<usize>,
}

impl FakeSerial {
    fn new() -> Self {
        FakeSerial {
            rx: VecDeque::new(),
            tx: Vec::new(),
            tx_fail_after: None,
        }
    }
}

impl serial::Read<u8> for FakeSerial {
    type Error = ();

    fn read(&mut self) -> nb::Result<u8, ()> {
        self.rx.pop_front().ok_or(nb::Error::WouldBlock)
    }
}

impl serial::Write<u8> for FakeSerial {
    type Error = ();

    fn write(&mut self, word: u8) -> nb::Result<(), ()> {
        if let Some(limit) = self.tx_fail_after {
            if self.tx.len() >= limit {
                return Err(nb::Error::Other(()));
            }
        }
        self.tx.push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), ()> {
        Ok(())
    }
}

#[test]
fn formatting_reaches_the_serial_port() {
    let mut stream = SerialStream(FakeSerial::new());

    assert_eq!(stream.print("heading "), 8);
    assert_eq!(stream.println_int(137, 10), 5);

    assert_eq!(stream.0.tx, b"heading 137\r\n");
}

#[test]
fn would_block_is_the_no_data_sentinel() {
    let mut stream = SerialStream(FakeSerial::new());
    assert_eq!(stream.read(), None);

    stream.0.rx.extend(b"$N");
    assert_eq!(stream.read(), Some(b'$'));
    assert_eq!(stream.read(), Some(b'N'));
    assert_eq!(stream.read(), None);
}

#[test]
fn device_errors_degrade_to_short_counts() {
    let mut device = FakeSerial::new();
    device.tx_fail_after = Some(3);
    let mut stream = SerialStream(device);

    assert_eq!(stream.print("abcdef"), 3);
    assert_eq!(stream.0.tx, b"abc");
}
