//! Network link and HTTP transport traits
//!
//! Both are async: joining a network and a request round trip are the only
//! operations in the control loop that wait on the outside world.

/// Errors from joining the wireless network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Association or authentication was rejected
    JoinFailed,
    /// Joined but no address was configured in time
    NoAddress,
}

/// Errors from an HTTP round trip
///
/// [`TransportError::code`] gives the numeric status a classic HTTP client
/// reports for the same failure; all codes are `<= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Server responded with status code 0
    EmptyStatus,
    /// Connection could not be opened (includes DNS failure)
    ConnectionRefused,
    /// Request could not be written
    SendFailed,
    /// No network to send on
    NotConnected,
    /// Connection dropped mid-response
    ConnectionLost,
    /// Response was not HTTP
    NoHttpServer,
    /// Response does not fit the receive buffer
    ResponseTooLarge,
    /// No response within the request timeout
    Timeout,
}

impl TransportError {
    /// Numeric status for this failure
    pub const fn code(self) -> i16 {
        match self {
            Self::EmptyStatus => 0,
            Self::ConnectionRefused => -1,
            Self::SendFailed => -3,
            Self::NotConnected => -4,
            Self::ConnectionLost => -5,
            Self::NoHttpServer => -7,
            Self::ResponseTooLarge => -8,
            Self::Timeout => -11,
        }
    }
}

/// Status and body length of a completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Bytes of body written to the caller's buffer
    pub body_len: usize,
}

/// Trait for the wireless link
#[allow(async_fn_in_trait)]
pub trait NetworkLink {
    /// Try once to join `ssid`
    async fn join(&mut self, ssid: &str, password: &str) -> Result<(), LinkError>;

    /// Check if the link is up and has an address
    fn is_connected(&self) -> bool;
}

/// Trait for one-shot HTTP requests
///
/// Each call opens a fresh connection, sends one request and reads the
/// response to completion or to the transport's own timeout.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// POST `body` to `url`
    ///
    /// The response body is copied into `response`. A body longer than
    /// `response` is reported as [`TransportError::ResponseTooLarge`].
    async fn post(
        &mut self,
        url: &str,
        content_type: &str,
        body: &[u8],
        response: &mut [u8],
    ) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_codes_are_non_positive() {
        let all = [
            TransportError::EmptyStatus,
            TransportError::ConnectionRefused,
            TransportError::SendFailed,
            TransportError::NotConnected,
            TransportError::ConnectionLost,
            TransportError::NoHttpServer,
            TransportError::ResponseTooLarge,
            TransportError::Timeout,
        ];
        for err in all {
            assert!(err.code() <= 0);
        }
        assert_eq!(TransportError::ConnectionRefused.code(), -1);
        assert_eq!(TransportError::Timeout.code(), -11);
    }
}
