use super::{DatagramTransport, PacketBuffer};
use core::net::SocketAddr;
use std::io;
use std::net::UdpSocket;

/// Largest UDP payload that still fits a standard Ethernet frame
/// (1500 byte MTU minus IP and UDP headers).
pub const MAX_DATAGRAM_PAYLOAD: usize = 1472;

/// [DatagramTransport] over a `std::net::UdpSocket`.
///
/// The socket runs in non-blocking mode so that an empty inbound poll
/// returns immediately. Send failures are swallowed: per the stream
/// contract, an unreachable transport degrades to lost packets and empty
/// reads, never to an error the caller has to handle.
pub struct UdpTransport {
    socket: UdpSocket,
    peer: Option<SocketAddr>,
    outbound: PacketBuffer<MAX_DATAGRAM_PAYLOAD>,
    inbound: PacketBuffer<MAX_DATAGRAM_PAYLOAD>,
}

impl UdpTransport {
    /// Wrap an already bound socket, switching it to non-blocking mode.
    pub fn new(socket: UdpSocket) -> io::Result<Self> {
        socket.set_nonblocking(true)?;
        Ok(Self {
            socket,
            peer: None,
            outbound: PacketBuffer::new(),
            inbound: PacketBuffer::new(),
        })
    }

    /// Bind a fresh socket on `local_port` (all interfaces).
    pub fn bind(local_port: u16) -> io::Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", local_port))?;
        Self::new(socket)
    }
}

impl DatagramTransport for UdpTransport {
    fn open_packet(&mut self, peer: SocketAddr) {
        self.peer = Some(peer);
        self.outbound.clear();
    }

    fn write_packet(&mut self, data: &[u8]) -> usize {
        self.outbound.append(data)
    }

    fn close_and_send_packet(&mut self) {
        if let Some(peer) = self.peer {
            let _ = self.socket.send_to(self.outbound.payload(), peer);
        }
        self.outbound.clear();
    }

    fn poll_inbound_packet(&mut self) {
        // Keep the current packet until it is fully drained.
        if !self.inbound.is_drained() {
            return;
        }
        let mut scratch = [0u8; MAX_DATAGRAM_PAYLOAD];
        if let Ok((len, _from)) = self.socket.recv_from(&mut scratch) {
            self.inbound.clear();
            self.inbound.append(&scratch[..len]);
        }
    }

    fn read_packet(&mut self) -> Option<u8> {
        self.inbound.pop()
    }

    fn peek_packet(&mut self) -> Option<u8> {
        self.inbound.peek()
    }
}
