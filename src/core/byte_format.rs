use serde::{Deserialize, Serialize};

/// Unit base for human-readable byte counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ByteUnitSystem {
    /// Powers of 1000: `kB`, `MB`, ...
    #[default]
    Si,
    /// Powers of 1024: `KiB`, `MiB`, ...
    Binary,
}

impl ByteUnitSystem {
    fn base(self) -> i64 {
        match self {
            Self::Si => 1000,
            Self::Binary => 1024,
        }
    }

    fn prefixes(self) -> &'static [&'static str; 6] {
        match self {
            Self::Si => &["k", "M", "G", "T", "P", "E"],
            Self::Binary => &["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"],
        }
    }
}

/// Formats a byte count with one decimal, e.g. `1728 -> "1.7 kB"`.
#[must_use]
pub fn format_byte_count(bytes: i64, system: ByteUnitSystem) -> String {
    let bytes = bytes.max(0);
    let base = system.base();
    if bytes < base {
        return format!("{bytes} B");
    }

    let mut exponent = 0usize;
    let mut remaining = bytes;
    while remaining >= base && exponent < system.prefixes().len() {
        remaining /= base;
        exponent += 1;
    }

    let scaled = bytes as f64 / (base as f64).powi(exponent as i32);
    format!("{scaled:.1} {}B", system.prefixes()[exponent - 1])
}
