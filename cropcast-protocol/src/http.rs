//! HTTP/1.0 framing for one-shot requests
//!
//! Each prediction fetch opens a connection, writes one request, and reads
//! until the server closes. `Connection: close` is always sent, so the end of
//! the stream delimits the response even without `Content-Length`.
//!
//! Request head:
//! ```text
//! POST /predict HTTP/1.0\r\n
//! Host: 10.0.0.2:1234\r\n
//! Content-Type: application/json\r\n
//! Content-Length: 118\r\n
//! Connection: close\r\n
//! \r\n
//! ```

use core::fmt::{self, Write};

/// Port used when the URL does not name one
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Errors from parsing an endpoint URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndpointError {
    /// Only plain `http://` URLs are supported
    UnsupportedScheme,
    /// No host between the scheme and the path
    MissingHost,
    /// Port is not a number in 1-65535
    InvalidPort,
}

/// Errors from framing a request or parsing a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpError {
    /// Request head does not fit the output buffer
    BufferTooSmall,
    /// Stream ended before the end of the response head
    Incomplete,
    /// First line is not `HTTP/1.x <code> ...`
    MalformedStatusLine,
    /// A header line could not be parsed
    MalformedHeader,
}

/// Parsed `http://host[:port][/path]` URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Endpoint<'a> {
    /// Host name or IPv4 literal
    pub host: &'a str,
    /// TCP port
    pub port: u16,
    /// Request path, always starting with `/`
    pub path: &'a str,
}

impl<'a> Endpoint<'a> {
    /// Parse an endpoint URL
    pub fn parse(url: &'a str) -> Result<Self, EndpointError> {
        let rest = url
            .strip_prefix("http://")
            .ok_or(EndpointError::UnsupportedScheme)?;

        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| EndpointError::InvalidPort)?;
                (host, port)
            }
            None => (authority, DEFAULT_HTTP_PORT),
        };

        if host.is_empty() {
            return Err(EndpointError::MissingHost);
        }
        if port == 0 {
            return Err(EndpointError::InvalidPort);
        }

        Ok(Self { host, port, path })
    }
}

/// `fmt::Write` over a byte slice
struct SliceWriter<'b> {
    buf: &'b mut [u8],
    len: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let end = self.len + bytes.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }
}

/// Write a `POST` request head into `buf`
///
/// The body is sent separately, right after the head. Returns the number of
/// bytes written.
pub fn write_post_head(
    buf: &mut [u8],
    endpoint: &Endpoint<'_>,
    content_type: &str,
    content_length: usize,
) -> Result<usize, HttpError> {
    let mut w = SliceWriter { buf, len: 0 };

    write_head(&mut w, endpoint, content_type, content_length)
        .map_err(|_| HttpError::BufferTooSmall)?;

    Ok(w.len)
}

fn write_head(
    w: &mut SliceWriter<'_>,
    endpoint: &Endpoint<'_>,
    content_type: &str,
    content_length: usize,
) -> fmt::Result {
    write!(w, "POST {} HTTP/1.0\r\n", endpoint.path)?;
    if endpoint.port == DEFAULT_HTTP_PORT {
        write!(w, "Host: {}\r\n", endpoint.host)?;
    } else {
        write!(w, "Host: {}:{}\r\n", endpoint.host, endpoint.port)?;
    }
    write!(w, "Content-Type: {}\r\n", content_type)?;
    write!(w, "Content-Length: {}\r\n", content_length)?;
    w.write_str("Connection: close\r\n\r\n")
}

/// A parsed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response<'a> {
    /// Status code from the status line
    pub status: u16,
    /// Body bytes, limited to `Content-Length` when present
    pub body: &'a [u8],
}

/// Parse a complete response read to end of stream
pub fn parse_response(raw: &[u8]) -> Result<Response<'_>, HttpError> {
    let head_end = find_subslice(raw, b"\r\n\r\n").ok_or(HttpError::Incomplete)?;
    let head = core::str::from_utf8(&raw[..head_end]).map_err(|_| HttpError::MalformedHeader)?;

    let mut lines = head.split("\r\n");
    let status = parse_status_line(lines.next().unwrap_or(""))?;

    let mut content_length = None;
    for line in lines {
        let (name, value) = line.split_once(':').ok_or(HttpError::MalformedHeader)?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            let len = value
                .trim()
                .parse::<usize>()
                .map_err(|_| HttpError::MalformedHeader)?;
            content_length = Some(len);
        }
    }

    let body = &raw[head_end + 4..];
    // A short body is passed through; the JSON decoder rejects it
    let body = match content_length {
        Some(len) if len < body.len() => &body[..len],
        _ => body,
    };

    Ok(Response { status, body })
}

fn parse_status_line(line: &str) -> Result<u16, HttpError> {
    let mut parts = line.split_ascii_whitespace();

    let version = parts.next().ok_or(HttpError::MalformedStatusLine)?;
    if !version.starts_with("HTTP/1.") {
        return Err(HttpError::MalformedStatusLine);
    }

    let code = parts.next().ok_or(HttpError::MalformedStatusLine)?;
    if code.len() != 3 {
        return Err(HttpError::MalformedStatusLine);
    }
    code.parse::<u16>()
        .map_err(|_| HttpError::MalformedStatusLine)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint_with_port_and_path() {
        let ep = Endpoint::parse("http://139.59.230.47:1234/predict").unwrap();
        assert_eq!(ep.host, "139.59.230.47");
        assert_eq!(ep.port, 1234);
        assert_eq!(ep.path, "/predict");
    }

    #[test]
    fn test_parse_endpoint_defaults() {
        let ep = Endpoint::parse("http://crops.local").unwrap();
        assert_eq!(ep.host, "crops.local");
        assert_eq!(ep.port, DEFAULT_HTTP_PORT);
        assert_eq!(ep.path, "/");
    }

    #[test]
    fn test_parse_endpoint_errors() {
        assert_eq!(
            Endpoint::parse("https://crops.local/predict"),
            Err(EndpointError::UnsupportedScheme)
        );
        assert_eq!(
            Endpoint::parse("http://:8080/predict"),
            Err(EndpointError::MissingHost)
        );
        assert_eq!(
            Endpoint::parse("http://crops.local:99999/"),
            Err(EndpointError::InvalidPort)
        );
        assert_eq!(
            Endpoint::parse("http://crops.local:0/"),
            Err(EndpointError::InvalidPort)
        );
    }

    #[test]
    fn test_write_post_head() {
        let ep = Endpoint::parse("http://10.0.0.2:1234/predict").unwrap();
        let mut buf = [0u8; 256];
        let len = write_post_head(&mut buf, &ep, "application/json", 42).unwrap();
        let head = core::str::from_utf8(&buf[..len]).unwrap();

        assert_eq!(
            head,
            "POST /predict HTTP/1.0\r\n\
             Host: 10.0.0.2:1234\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 42\r\n\
             Connection: close\r\n\r\n"
        );
    }

    #[test]
    fn test_write_post_head_default_port_omitted() {
        let ep = Endpoint::parse("http://crops.local/predict").unwrap();
        let mut buf = [0u8; 256];
        let len = write_post_head(&mut buf, &ep, "application/json", 0).unwrap();
        let head = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(head.contains("Host: crops.local\r\n"));
    }

    #[test]
    fn test_write_post_head_buffer_too_small() {
        let ep = Endpoint::parse("http://crops.local/predict").unwrap();
        let mut buf = [0u8; 20];
        assert_eq!(
            write_post_head(&mut buf, &ep, "application/json", 10),
            Err(HttpError::BufferTooSmall)
        );
    }

    #[test]
    fn test_parse_response_with_content_length() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\n\r\n{}trailing";
        let resp = parse_response(raw).unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, b"{}");
    }

    #[test]
    fn test_parse_response_to_end_of_stream() {
        let raw = b"HTTP/1.0 500 INTERNAL SERVER ERROR\r\nServer: Werkzeug\r\n\r\n<html></html>";
        let resp = parse_response(raw).unwrap();
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body, b"<html></html>");
    }

    #[test]
    fn test_parse_response_incomplete_head() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n";
        assert_eq!(parse_response(raw), Err(HttpError::Incomplete));
    }

    #[test]
    fn test_parse_response_bad_status_line() {
        assert_eq!(
            parse_response(b"ICY 200 OK\r\n\r\n"),
            Err(HttpError::MalformedStatusLine)
        );
        assert_eq!(
            parse_response(b"HTTP/1.1 OK\r\n\r\n"),
            Err(HttpError::MalformedStatusLine)
        );
    }

    #[test]
    fn test_parse_response_bad_header() {
        assert_eq!(
            parse_response(b"HTTP/1.1 200 OK\r\nno-colon-here\r\n\r\n"),
            Err(HttpError::MalformedHeader)
        );
    }
}
