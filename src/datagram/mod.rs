//! Packet framing for datagram transports.
//!
//! A datagram link (UDP, typically) has no native byte stream: everything
//! travels in discrete packets. [DatagramStream] bridges the gap by batching
//! consecutive writes into one outbound packet and pulling one inbound
//! packet at a time to satisfy reads, while exposing the ordinary [Stream]
//! contract to the layers above.
//!
//! Line-oriented operations close the packet: every `println` variant sends
//! what has accumulated, so one logged line travels as one datagram. Plain
//! `print`/`write` calls keep appending to the open packet until an explicit
//! [DatagramStream::flush].

use crate::traits::{ByteSource, Stream, LINE_TERMINATOR};
use core::net::SocketAddr;

#[cfg(feature = "std")]
mod udp;

#[cfg(feature = "std")]
pub use self::udp::{UdpTransport, MAX_DATAGRAM_PAYLOAD};

/// Outbound side of the packet lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketState {
    /// No packet is open; the next byte written opens one.
    Idle,
    /// A packet is open and collecting bytes until the next flush.
    Accumulating,
}

/// Addressing for a [DatagramStream].
///
/// The transport must already be bound to `local_port` when it is handed to
/// [DatagramStream::new]; the adapter records the port but does not bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatagramConfig {
    /// Peer every outbound packet is addressed to.
    pub remote: SocketAddr,
    /// Local port the transport listens on for inbound packets.
    pub local_port: u16,
}

/// The capability set a concrete datagram transport provides. The adapter
/// drives the packet lifecycle; the transport owns the actual sockets and
/// staging memory.
///
/// Transport trouble is never surfaced as an error: a transport that cannot
/// send reports zero accepted bytes, one that has nothing received reports
/// `None`.
pub trait DatagramTransport {
    /// Start a fresh outbound packet addressed to `peer`, discarding any
    /// previously staged bytes.
    fn open_packet(&mut self, peer: SocketAddr);

    /// Append bytes to the open packet. Returns the number accepted, which
    /// is short once the packet is full.
    fn write_packet(&mut self, data: &[u8]) -> usize;

    /// Transmit the open packet.
    fn close_and_send_packet(&mut self);

    /// Non-blocking check for a newly arrived packet. Must not disturb
    /// undrained bytes of the current inbound packet.
    fn poll_inbound_packet(&mut self);

    /// Pop the next byte of the current inbound packet.
    fn read_packet(&mut self) -> Option<u8>;

    /// The next byte of the current inbound packet, without consuming it.
    fn peek_packet(&mut self) -> Option<u8>;
}

/// Adapter presenting a datagram transport as a [Stream].
pub struct DatagramStream<T: DatagramTransport> {
    transport: T,
    config: DatagramConfig,
    state: PacketState,
}

impl<T: DatagramTransport> DatagramStream<T> {
    /// Wrap a transport. The transport is expected to be bound to
    /// `config.local_port` already.
    pub fn new(transport: T, config: DatagramConfig) -> Self {
        Self {
            transport,
            config,
            state: PacketState::Idle,
        }
    }

    /// The adapter's addressing.
    pub fn config(&self) -> &DatagramConfig {
        &self.config
    }

    /// Where the outbound packet lifecycle currently stands.
    pub fn state(&self) -> PacketState {
        self.state
    }

    /// Send whatever has accumulated and return to [PacketState::Idle].
    /// A flush with no open packet does nothing.
    pub fn flush(&mut self) {
        if self.state == PacketState::Accumulating {
            self.transport.close_and_send_packet();
            self.state = PacketState::Idle;
        }
    }

    /// The next inbound byte without consuming it, polling the transport
    /// for a fresh packet first.
    pub fn peek(&mut self) -> Option<u8> {
        self.transport.poll_inbound_packet();
        self.transport.peek_packet()
    }

    /// Give up the adapter and return the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    fn open_if_idle(&mut self) {
        if self.state == PacketState::Idle {
            self.transport.open_packet(self.config.remote);
            self.state = PacketState::Accumulating;
        }
    }
}

impl<T: DatagramTransport> Stream for DatagramStream<T> {
    fn write(&mut self, data: &[u8]) -> usize {
        // An empty write performs no I/O, so it must not open a packet.
        if data.is_empty() {
            return 0;
        }
        self.open_if_idle();
        self.transport.write_packet(data)
    }

    fn read(&mut self) -> Option<u8> {
        self.transport.poll_inbound_packet();
        self.transport.read_packet()
    }

    fn println(&mut self, text: &str) -> usize {
        let mut written = self.print(text);
        written += self.write(LINE_TERMINATOR);
        self.flush();
        written
    }

    fn println_int(&mut self, val: i32, radix: u8) -> usize {
        let mut written = self.print_int(val, radix);
        written += self.write(LINE_TERMINATOR);
        self.flush();
        written
    }

    fn println_from(&mut self, src: &mut dyn ByteSource) -> usize {
        let mut written = self.print_from(src);
        written += self.write(LINE_TERMINATOR);
        self.flush();
        written
    }
}

/// Fixed-capacity staging area for one datagram.
///
/// Transports that must hand the medium a complete packet stage it here:
/// appends accept up to the remaining capacity (a short count past that),
/// reads pop from the front. One buffer holds one packet at a time.
pub struct PacketBuffer<const N: usize> {
    bytes: heapless::Vec<u8, N>,
    head: usize,
}

impl<const N: usize> PacketBuffer<N> {
    /// An empty buffer.
    pub fn new() -> Self {
        Self {
            bytes: heapless::Vec::new(),
            head: 0,
        }
    }

    /// Append bytes, returning how many fit.
    pub fn append(&mut self, data: &[u8]) -> usize {
        let space = N - self.bytes.len();
        let accepted = data.len().min(space);
        // Cannot fail, the count is clamped to the remaining capacity.
        let _ = self.bytes.extend_from_slice(&data[..accepted]);
        accepted
    }

    /// The complete staged packet, regardless of how much has been popped.
    pub fn payload(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes left to pop.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.head
    }

    /// True once every staged byte has been popped (or none was staged).
    pub fn is_drained(&self) -> bool {
        self.head >= self.bytes.len()
    }

    /// Pop the front byte.
    pub fn pop(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.head).copied()?;
        self.head += 1;
        Some(byte)
    }

    /// The front byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.head).copied()
    }

    /// Drop the staged packet and start over.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.head = 0;
    }
}

impl<const N: usize> Default for PacketBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
