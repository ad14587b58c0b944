use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Clone, Parser)]
#[command(name = "tether-server", version, about = "WebRTC signaling relay")]
pub struct ServerConfig {
    /// Address to bind the HTTP/WebSocket listener to.
    #[arg(long, env = "TETHER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(short, long, env = "TETHER_PORT", default_value_t = 5001)]
    pub port: u16,

    /// Capacity of the room service command queue.
    #[arg(long, env = "TETHER_COMMAND_BUFFER", default_value_t = 256)]
    pub command_buffer: usize,

    /// Fallback log filter when `RUST_LOG` is unset.
    #[arg(long, env = "TETHER_LOG", default_value = "info")]
    pub log: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
