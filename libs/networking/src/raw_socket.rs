//! Link-layer raw sockets bound to a single interface.

use std::io;
use std::mem;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, IntoRawFd, OwnedFd, RawFd};

use tracing::{debug, info};

use crate::byte_order::{htons, ETH_P_ALL};
use crate::error::NetworkError;
use crate::interface::resolve_index;

/// A raw `AF_PACKET` socket bound to one interface.
///
/// Owns the descriptor; dropping the binding closes it.
#[derive(Debug)]
pub struct RawSocketBinding {
    fd: OwnedFd,
    protocol: u16,
    ifindex: u32,
}

impl RawSocketBinding {
    /// Protocol filter in network byte order.
    pub fn protocol(&self) -> u16 {
        self.protocol
    }

    /// Index of the bound interface.
    pub fn ifindex(&self) -> u32 {
        self.ifindex
    }

    /// Give up the binding and keep only the descriptor.
    pub fn into_fd(self) -> OwnedFd {
        self.fd
    }
}

impl AsFd for RawSocketBinding {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

impl AsRawFd for RawSocketBinding {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl IntoRawFd for RawSocketBinding {
    fn into_raw_fd(self) -> RawFd {
        self.fd.into_raw_fd()
    }
}

/// Build the link-layer address for binding to `ifindex`.
///
/// `protocol` is given in host byte order and stored in network byte order.
pub fn link_layer_address(ifindex: u32, protocol: u16) -> libc::sockaddr_ll {
    // SAFETY: sockaddr_ll is plain old data; all-zero is a valid value.
    let mut addr: libc::sockaddr_ll = unsafe { mem::zeroed() };
    addr.sll_family = libc::AF_PACKET as libc::c_ushort;
    addr.sll_protocol = htons(protocol);
    addr.sll_ifindex = ifindex as libc::c_int;
    addr
}

/// Open a raw socket receiving every protocol and bind it to `interface`.
///
/// The interface is resolved before any socket is allocated, so a missing
/// interface never creates a descriptor. A socket whose bind fails is closed
/// before the error is returned.
pub fn open_bound_raw_socket(interface: &str) -> Result<RawSocketBinding, NetworkError> {
    let ifindex = resolve_index(interface)?;
    let protocol = htons(ETH_P_ALL);

    let fd = create_packet_socket(protocol).map_err(NetworkError::SocketCreation)?;
    debug!(interface = %interface, fd = fd.as_raw_fd(), "created raw socket");

    let addr = link_layer_address(ifindex, ETH_P_ALL);
    // SAFETY: addr is a fully initialised sockaddr_ll and the length matches it.
    let ret = unsafe {
        libc::bind(
            fd.as_raw_fd(),
            &addr as *const libc::sockaddr_ll as *const libc::sockaddr,
            mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
        )
    };
    if ret < 0 {
        return Err(NetworkError::SocketBind {
            interface: interface.to_string(),
            source: io::Error::last_os_error(),
        });
    }

    info!(interface = %interface, ifindex, "raw socket bound");

    Ok(RawSocketBinding {
        fd,
        protocol,
        ifindex,
    })
}

fn create_packet_socket(protocol: u16) -> io::Result<OwnedFd> {
    // SAFETY: plain socket(2) call; the result is checked before use.
    let raw = unsafe {
        libc::socket(
            libc::AF_PACKET,
            libc::SOCK_RAW | libc::SOCK_CLOEXEC,
            libc::c_int::from(protocol),
        )
    };
    if raw < 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: raw is a freshly created descriptor owned by nobody else.
    Ok(unsafe { OwnedFd::from_raw_fd(raw) })
}
