//! WiFi link and one-shot HTTP transport over cyw43 + embassy-net

use cyw43::{Control, JoinOptions};
use defmt::*;
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::{ConnectError, TcpSocket};
use embassy_net::{IpAddress, Ipv4Address, Stack};
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Write;

use cropcast_core::traits::{HttpResponse, HttpTransport, LinkError, NetworkLink, TransportError};
use cropcast_protocol::{parse_response, write_post_head, Endpoint};

/// How long to wait for a DHCP lease after associating (ms)
const DHCP_TIMEOUT_MS: u64 = 10_000;

/// TCP socket buffer size, each direction
const SOCKET_BUF_LEN: usize = 1024;

/// Request head buffer size
const HEAD_BUF_LEN: usize = 256;

/// Whole-response buffer size (head and body)
const RAW_RESPONSE_LEN: usize = 1024;

/// CYW43 station link
pub struct PicoLink {
    control: Control<'static>,
    stack: Stack<'static>,
}

impl PicoLink {
    pub fn new(control: Control<'static>, stack: Stack<'static>) -> Self {
        Self { control, stack }
    }
}

impl NetworkLink for PicoLink {
    async fn join(&mut self, ssid: &str, password: &str) -> Result<(), LinkError> {
        if let Err(e) = self
            .control
            .join(ssid, JoinOptions::new(password.as_bytes()))
            .await
        {
            warn!("WiFi join failed: status={}", e.status);
            return Err(LinkError::JoinFailed);
        }

        if with_timeout(
            Duration::from_millis(DHCP_TIMEOUT_MS),
            self.stack.wait_config_up(),
        )
        .await
        .is_err()
        {
            warn!("No DHCP lease");
            return Err(LinkError::NoAddress);
        }

        if let Some(config) = self.stack.config_v4() {
            info!("WiFi connected, IP: {}", config.address);
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stack.is_link_up() && self.stack.config_v4().is_some()
    }
}

/// HTTP/1.0 client opening one TCP connection per request
pub struct PicoTransport {
    stack: Stack<'static>,
    timeout: Duration,
    rx: [u8; SOCKET_BUF_LEN],
    tx: [u8; SOCKET_BUF_LEN],
    raw: [u8; RAW_RESPONSE_LEN],
}

impl PicoTransport {
    /// Create a transport whose round trips give up after `timeout_ms`
    pub fn new(stack: Stack<'static>, timeout_ms: u64) -> Self {
        Self {
            stack,
            timeout: Duration::from_millis(timeout_ms),
            rx: [0; SOCKET_BUF_LEN],
            tx: [0; SOCKET_BUF_LEN],
            raw: [0; RAW_RESPONSE_LEN],
        }
    }
}

impl HttpTransport for PicoTransport {
    async fn post(
        &mut self,
        url: &str,
        content_type: &str,
        body: &[u8],
        response: &mut [u8],
    ) -> Result<HttpResponse, TransportError> {
        let Self {
            stack,
            timeout,
            rx,
            tx,
            raw,
        } = self;

        if !stack.is_link_up() {
            return Err(TransportError::NotConnected);
        }

        let endpoint = Endpoint::parse(url).map_err(|_| TransportError::ConnectionRefused)?;
        let mut head = [0u8; HEAD_BUF_LEN];
        let head_len = write_post_head(&mut head, &endpoint, content_type, body.len())
            .map_err(|_| TransportError::SendFailed)?;

        let address = resolve(*stack, endpoint.host).await?;
        let exchange = Exchange {
            remote: (address, endpoint.port),
            head: &head[..head_len],
            body,
            timeout: *timeout,
        };

        let received = with_timeout(*timeout, exchange.run(*stack, rx, tx, raw))
            .await
            .map_err(|_| TransportError::Timeout)??;

        let parsed = parse_response(&raw[..received]).map_err(|e| {
            warn!("Malformed HTTP response: {}", e);
            TransportError::NoHttpServer
        })?;

        let out = response
            .get_mut(..parsed.body.len())
            .ok_or(TransportError::ResponseTooLarge)?;
        out.copy_from_slice(parsed.body);

        Ok(HttpResponse {
            status: parsed.status,
            body_len: parsed.body.len(),
        })
    }
}

/// IPv4 literal or DNS A lookup
async fn resolve(stack: Stack<'static>, host: &str) -> Result<IpAddress, TransportError> {
    if let Ok(ip) = host.parse::<Ipv4Address>() {
        return Ok(IpAddress::Ipv4(ip));
    }

    let addresses = stack
        .dns_query(host, DnsQueryType::A)
        .await
        .map_err(|_| {
            warn!("DNS lookup failed for {}", host);
            TransportError::ConnectionRefused
        })?;
    addresses
        .first()
        .copied()
        .ok_or(TransportError::ConnectionRefused)
}

/// One request/response on a fresh connection
struct Exchange<'a> {
    remote: (IpAddress, u16),
    head: &'a [u8],
    body: &'a [u8],
    timeout: Duration,
}

impl Exchange<'_> {
    /// Send the request and read the response to EOF into `raw`
    async fn run(
        &self,
        stack: Stack<'static>,
        rx: &mut [u8],
        tx: &mut [u8],
        raw: &mut [u8],
    ) -> Result<usize, TransportError> {
        let mut socket = TcpSocket::new(stack, rx, tx);
        socket.set_timeout(Some(self.timeout));

        socket.connect(self.remote).await.map_err(|e| match e {
            ConnectError::TimedOut => TransportError::Timeout,
            _ => TransportError::ConnectionRefused,
        })?;

        socket
            .write_all(self.head)
            .await
            .map_err(|_| TransportError::SendFailed)?;
        socket
            .write_all(self.body)
            .await
            .map_err(|_| TransportError::SendFailed)?;
        socket
            .flush()
            .await
            .map_err(|_| TransportError::SendFailed)?;

        let mut len = 0;
        loop {
            if len == raw.len() {
                // Full buffer: only acceptable if the server is done
                let mut probe = [0u8; 1];
                match socket.read(&mut probe).await {
                    Ok(0) => break,
                    Ok(_) => {
                        socket.abort();
                        return Err(TransportError::ResponseTooLarge);
                    }
                    Err(_) => return Err(TransportError::ConnectionLost),
                }
            }
            match socket.read(&mut raw[len..]).await {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(_) => return Err(TransportError::ConnectionLost),
            }
        }

        socket.close();
        Ok(len)
    }
}
