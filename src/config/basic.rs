use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `8000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`. `RUST_LOG` takes precedence.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Drop the `Secure` attribute from the feedback cookie.
    ///
    /// The server itself only speaks plain HTTP. With the default `false`, browsers keep the
    /// cookie only when the page is reached over HTTPS (a TLS-terminating proxy) or on
    /// `localhost`; anywhere else the post-redirect banners never appear. Set `true` when
    /// serving plain HTTP on a non-loopback address.
    /// TOML: `basic.insecure_cookie`. Default: `false`.
    #[serde(default)]
    pub insecure_cookie: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            loglevel: default_loglevel(),
            insecure_cookie: false,
        }
    }
}

impl BasicConfig {
    /// True when a `Secure` cookie is issued from a plain-HTTP, non-loopback listener,
    /// which browsers drop unless a TLS proxy sits in front.
    pub fn secure_cookie_needs_tls_proxy(&self) -> bool {
        !self.insecure_cookie && !self.listen_addr.is_loopback()
    }
}

fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

fn default_listen_port() -> u16 {
    8000
}

fn default_loglevel() -> String {
    "info".to_string()
}
