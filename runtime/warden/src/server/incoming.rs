use std::net::SocketAddr;

use socket2::Domain;
use tokio::net::{TcpListener, TcpStream};

/// A stream of incoming TCP connections.
///
/// [`IncomingStream::bind`] is the primary entrypoint.
/// Convert a [`std::net::TcpListener`] via [`TryFrom::try_from`] if you need
/// to customize the socket options.
#[derive(Debug)]
pub struct IncomingStream {
    listener: TcpListener,
}

impl IncomingStream {
    /// Bind a new listener to `addr`.
    /// The socket is non-blocking and it reuses the address.
    pub async fn bind(addr: SocketAddr) -> std::io::Result<Self> {
        let socket = socket2::Socket::new(
            Domain::for_address(addr),
            socket2::Type::STREAM,
            Some(socket2::Protocol::TCP),
        )?;

        socket.set_reuse_address(true)?;
        socket.set_nonblocking(true)?;
        socket.bind(&addr.into())?;
        socket.listen(1024_i32)?;

        let listener = std::net::TcpListener::from(socket);
        Ok(Self {
            listener: TcpListener::from_std(listener)?,
        })
    }

    /// The address this stream is bound to.
    ///
    /// It differs from the requested one when binding to port `0`:
    /// the OS picks a free port for us.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept a new incoming connection.
    pub async fn accept(&self) -> std::io::Result<(TcpStream, SocketAddr)> {
        self.listener.accept().await
    }
}

impl TryFrom<std::net::TcpListener> for IncomingStream {
    type Error = std::io::Error;

    fn try_from(listener: std::net::TcpListener) -> Result<Self, Self::Error> {
        listener.set_nonblocking(true)?;
        Ok(Self {
            listener: TcpListener::from_std(listener)?,
        })
    }
}
