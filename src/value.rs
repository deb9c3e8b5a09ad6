//! Typed assignment targets.
//!
//! A [`Target`] is a closed set of caller-owned `&mut T` and `&mut Vec<T>`
//! references, one variant per supported [`Kind`]. Registering storage of
//! any other type does not compile.

use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use crate::net::{IpMask, MacAddr};

/// Type tag of a target, used by the engine and by help rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Path,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Duration,
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
    SocketAddr,
    MacAddr,
    IpMask,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Path => "path",
            Kind::Bool => "bool",
            Kind::Char => "char",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::I128 => "i128",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::U128 => "u128",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Duration => "duration",
            Kind::IpAddr => "ip",
            Kind::Ipv4Addr => "ipv4",
            Kind::Ipv6Addr => "ipv6",
            Kind::SocketAddr => "socket address",
            Kind::MacAddr => "mac address",
            Kind::IpMask => "ip mask",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A type a flag or positional value can be coerced into.
pub trait Value: sealed::Sealed + Sized {
    const KIND: Kind;

    /// Parses one raw argument.
    fn parse_value(raw: &str) -> Result<Self, String>;

    /// Appends the values carried by `raw` to a repeated target.
    fn append(list: &mut Vec<Self>, raw: &str) -> Result<(), String> {
        list.push(Self::parse_value(raw)?);
        Ok(())
    }

    /// Current value as shown in help, `None` when it is not worth showing.
    fn render(&self) -> Option<String>;
}

macro_rules! from_str_values {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}
        impl Value for $ty {
            const KIND: Kind = Kind::$kind;
            fn parse_value(raw: &str) -> Result<Self, String> {
                raw.parse::<$ty>().map_err(|err| err.to_string())
            }
            fn render(&self) -> Option<String> {
                Some(self.to_string())
            }
        }
    )*};
}

from_str_values! {
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    IpAddr => IpAddr,
    Ipv4Addr => Ipv4Addr,
    Ipv6Addr => Ipv6Addr,
    SocketAddr => SocketAddr,
    MacAddr => MacAddr,
    IpMask => IpMask,
}

impl sealed::Sealed for String {}
impl Value for String {
    const KIND: Kind = Kind::String;

    fn parse_value(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }

    /// `-s one,two` appends both `one` and `two`.
    fn append(list: &mut Vec<Self>, raw: &str) -> Result<(), String> {
        list.extend(raw.split(',').map(str::to_string));
        Ok(())
    }

    fn render(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.clone())
    }
}

impl sealed::Sealed for PathBuf {}
impl Value for PathBuf {
    const KIND: Kind = Kind::Path;

    fn parse_value(raw: &str) -> Result<Self, String> {
        Ok(PathBuf::from(raw))
    }

    fn render(&self) -> Option<String> {
        (!self.as_os_str().is_empty()).then(|| self.display().to_string())
    }
}

impl sealed::Sealed for bool {}
impl Value for bool {
    const KIND: Kind = Kind::Bool;

    fn parse_value(raw: &str) -> Result<Self, String> {
        match raw {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err("expected `true` or `false`".to_string()),
        }
    }

    fn render(&self) -> Option<String> {
        None
    }
}

impl sealed::Sealed for Duration {}
impl Value for Duration {
    const KIND: Kind = Kind::Duration;

    fn parse_value(raw: &str) -> Result<Self, String> {
        parse_duration(raw)
    }

    fn render(&self) -> Option<String> {
        Some(format_duration(*self))
    }
}

macro_rules! targets {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        #[derive(Debug)]
        enum Scalar<'a> {
            $($kind(&'a mut $ty),)*
        }

        #[derive(Debug)]
        enum Repeated<'a> {
            $($kind(&'a mut Vec<$ty>),)*
        }

        impl Scalar<'_> {
            fn kind(&self) -> Kind {
                match self {
                    $(Scalar::$kind(_) => <$ty>::KIND,)*
                }
            }
            fn check(&self, raw: &str) -> Result<(), String> {
                match self {
                    $(Scalar::$kind(_) => <$ty>::parse_value(raw).map(drop),)*
                }
            }
            fn set(&mut self, raw: &str) -> Result<(), String> {
                match self {
                    $(Scalar::$kind(it) => **it = <$ty>::parse_value(raw)?,)*
                }
                Ok(())
            }
            fn render(&self) -> Option<String> {
                match self {
                    $(Scalar::$kind(it) => it.render(),)*
                }
            }
        }

        impl Repeated<'_> {
            fn kind(&self) -> Kind {
                match self {
                    $(Repeated::$kind(_) => <$ty>::KIND,)*
                }
            }
            fn check(&self, raw: &str) -> Result<(), String> {
                match self {
                    $(Repeated::$kind(_) => <$ty>::append(&mut Vec::new(), raw),)*
                }
            }
            fn set(&mut self, raw: &str) -> Result<(), String> {
                match self {
                    $(Repeated::$kind(it) => <$ty>::append(it, raw),)*
                }
            }
        }

        $(
            impl<'a> From<&'a mut $ty> for Target<'a> {
                fn from(target: &'a mut $ty) -> Target<'a> {
                    Target(Slot::Scalar(Scalar::$kind(target)))
                }
            }
            impl<'a> From<&'a mut Vec<$ty>> for Target<'a> {
                fn from(target: &'a mut Vec<$ty>) -> Target<'a> {
                    Target(Slot::Repeated(Repeated::$kind(target)))
                }
            }
        )*
    };
}

targets! {
    String => String,
    PathBuf => Path,
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    Duration => Duration,
    IpAddr => IpAddr,
    Ipv4Addr => Ipv4Addr,
    Ipv6Addr => Ipv6Addr,
    SocketAddr => SocketAddr,
    MacAddr => MacAddr,
    IpMask => IpMask,
}

#[derive(Debug)]
enum Slot<'a> {
    Scalar(Scalar<'a>),
    Repeated(Repeated<'a>),
}

/// Caller-owned storage a flag writes through: `&mut T` is overwritten,
/// `&mut Vec<T>` is appended to. Built with `From`.
#[derive(Debug)]
pub struct Target<'a>(Slot<'a>);

impl Target<'_> {
    pub fn kind(&self) -> Kind {
        match &self.0 {
            Slot::Scalar(it) => it.kind(),
            Slot::Repeated(it) => it.kind(),
        }
    }

    pub fn is_repeated(&self) -> bool {
        matches!(self.0, Slot::Repeated(_))
    }

    /// Parses `raw` without touching the storage.
    pub(crate) fn check(&self, raw: &str) -> Result<(), String> {
        match &self.0 {
            Slot::Scalar(it) => it.check(raw),
            Slot::Repeated(it) => it.check(raw),
        }
    }

    pub(crate) fn set(&mut self, raw: &str) -> Result<(), String> {
        match &mut self.0 {
            Slot::Scalar(it) => it.set(raw),
            Slot::Repeated(it) => it.set(raw),
        }
    }

    /// Current value for help output; repeated targets show nothing.
    pub(crate) fn render(&self) -> Option<String> {
        match &self.0 {
            Slot::Scalar(it) => it.render(),
            Slot::Repeated(_) => None,
        }
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parses a duration such as `300ms`, `1.5h` or `2h45m`.
///
/// Units: `ns`, `us` (`µs`), `ms`, `s`, `m`, `h`. A bare `0` is accepted.
/// Negative durations are rejected.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let invalid = || format!("invalid duration `{raw}`");

    let mut rest = raw.strip_prefix('+').unwrap_or(raw);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.starts_with('-') {
        return Err(format!("negative duration `{raw}`"));
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let num_len = rest.find(|c: char| !(c.is_ascii_digit() || c == '.')).unwrap_or(rest.len());
        let (num, tail) = rest.split_at(num_len);
        let unit_len = tail.find(|c: char| c.is_ascii_digit() || c == '.').unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        rest = tail;

        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3600 * NANOS_PER_SEC,
            "" => return Err(format!("missing unit in duration `{raw}`")),
            _ => return Err(format!("unknown unit `{unit}` in duration `{raw}`")),
        };

        let (int, frac) = num.split_once('.').unwrap_or((num, ""));
        if int.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        let int: u128 = if int.is_empty() { 0 } else { int.parse().map_err(|_| invalid())? };
        let mut nanos = int.checked_mul(scale).ok_or_else(invalid)?;
        let mut place = scale;
        for digit in frac.chars() {
            let digit = digit.to_digit(10).ok_or_else(invalid)?;
            place /= 10;
            nanos = nanos.checked_add(u128::from(digit) * place).ok_or_else(invalid)?;
        }
        total = total.checked_add(nanos).ok_or_else(invalid)?;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| invalid())?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

/// Formats `d` in the syntax [`parse_duration`] accepts: `1h2m3.5s`, `250ms`, `0s`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", trim_fraction(nanos, 1_000));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", trim_fraction(nanos, 1_000_000));
    }

    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    let seconds = trim_fraction(u128::from(s) * NANOS_PER_SEC + u128::from(d.subsec_nanos()), NANOS_PER_SEC);
    match (h, m) {
        (0, 0) => format!("{seconds}s"),
        (0, m) => format!("{m}m{seconds}s"),
        (h, m) => format!("{h}h{m}m{seconds}s"),
    }
}

fn trim_fraction(value: u128, unit: u128) -> String {
    let (int, frac) = (value / unit, value % unit);
    if frac == 0 {
        return int.to_string();
    }
    let width = (unit.ilog10()) as usize;
    let frac = format!("{frac:0width$}");
    format!("{int}.{}", frac.trim_end_matches('0'))
}
