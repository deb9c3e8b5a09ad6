//! Network value types the standard library does not provide.

use std::{
    fmt,
    net::{IpAddr, Ipv4Addr},
    str::FromStr,
};

/// An IEEE 802 MAC-48 address, written `32:00:16:46:20:00` or `32-00-16-46-20-00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddr {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<MacAddr, AddrParseError> {
        let err = || AddrParseError { kind: "mac address", input: s.to_string() };
        let sep = if s.contains('-') { '-' } else { ':' };

        let mut octets = [0u8; 6];
        let mut parts = s.split(sep);
        for octet in octets.iter_mut() {
            let part = parts
                .next()
                .filter(|it| it.len() == 2 && it.bytes().all(|b| b.is_ascii_hexdigit()))
                .ok_or_else(err)?;
            *octet = u8::from_str_radix(part, 16).map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(MacAddr(octets))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// A network mask in address form, such as `255.255.255.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpMask(pub IpAddr);

impl IpMask {
    /// Number of leading one bits, `None` for a non-canonical mask like `255.0.255.0`.
    pub fn prefix_len(&self) -> Option<u32> {
        let (bits, width) = match self.0 {
            IpAddr::V4(it) => (u128::from(u32::from(it)) << 96, 32),
            IpAddr::V6(it) => (u128::from(it), 128),
        };
        let ones = bits.leading_ones();
        let canonical = bits.checked_shl(ones).unwrap_or(0) == 0;
        canonical.then_some(ones.min(width))
    }
}

impl Default for IpMask {
    fn default() -> IpMask {
        IpMask(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }
}

impl FromStr for IpMask {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<IpMask, AddrParseError> {
        s.parse::<IpAddr>()
            .map(IpMask)
            .map_err(|_| AddrParseError { kind: "ip mask", input: s.to_string() })
    }
}

impl fmt::Display for IpMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} syntax: `{input}`")]
pub struct AddrParseError {
    kind: &'static str,
    input: String,
}
