//! Kapasitas ring buffer yang sudah tervalidasi.
//!
//! Kapasitas harus power of 2 dan minimal 2 supaya posisi slot bisa dihitung
//! dengan `cursor & mask` alih-alih modulo.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Error konfigurasi kapasitas. Fatal: tidak pernah ada instance setengah jadi.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    /// Kapasitas di bawah minimum (0 atau 1).
    #[error("capacity {requested} is too small, minimum is {}", Capacity::MIN)]
    TooSmall {
        /// Kapasitas yang diminta
        requested: usize,
    },
    /// Kapasitas bukan power of 2.
    #[error("capacity {requested} is not a power of two")]
    NotPowerOfTwo {
        /// Kapasitas yang diminta
        requested: usize,
    },
    /// Pembulatan ke power of 2 berikutnya melewati `usize::MAX`.
    #[error("no power of two >= {requested} fits in usize")]
    Overflow {
        /// Kapasitas yang diminta
        requested: usize,
    },
    /// Teks kapasitas bukan bilangan desimal.
    #[error("invalid capacity {input:?}: {source}")]
    Parse {
        /// Teks asli
        input: String,
        /// Error parsing dari `usize::from_str`
        #[source]
        source: ParseIntError,
    },
}

/// Jumlah slot ring buffer: power of 2, `>= 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(usize);

impl Capacity {
    /// Kapasitas terkecil yang valid.
    pub const MIN: usize = 2;

    /// Validasi kapasitas persis seperti yang diminta.
    pub fn new(requested: usize) -> Result<Self, CapacityError> {
        if requested < Self::MIN {
            return Err(CapacityError::TooSmall { requested });
        }
        if !requested.is_power_of_two() {
            return Err(CapacityError::NotPowerOfTwo { requested });
        }
        Ok(Self(requested))
    }

    /// Bulatkan ke atas ke power of 2 terdekat (minimal [`Capacity::MIN`]).
    pub fn at_least(requested: usize) -> Result<Self, CapacityError> {
        if requested <= Self::MIN {
            return Ok(Self(Self::MIN));
        }
        match requested.checked_next_power_of_two() {
            Some(n) => Ok(Self(n)),
            None => Err(CapacityError::Overflow { requested }),
        }
    }

    /// Jumlah slot
    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0
    }

    /// `capacity - 1`, dipakai untuk index masking.
    #[inline(always)]
    pub const fn mask(self) -> usize {
        self.0 - 1
    }
}

impl TryFrom<usize> for Capacity {
    type Error = CapacityError;

    fn try_from(requested: usize) -> Result<Self, Self::Error> {
        Self::new(requested)
    }
}

impl FromStr for Capacity {
    type Err = CapacityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let requested = s.trim().parse::<usize>().map_err(|source| CapacityError::Parse {
            input: s.to_string(),
            source,
        })?;
        Self::new(requested)
    }
}

impl From<Capacity> for usize {
    fn from(capacity: Capacity) -> Self {
        capacity.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_capacities() {
        assert_eq!(
            Capacity::new(0),
            Err(CapacityError::TooSmall { requested: 0 })
        );
        assert_eq!(
            Capacity::new(1),
            Err(CapacityError::TooSmall { requested: 1 })
        );
        for requested in [3, 5, 6, 7, 12, 1000, 65535] {
            assert_eq!(
                Capacity::new(requested),
                Err(CapacityError::NotPowerOfTwo { requested })
            );
        }
    }

    #[test]
    fn test_accepts_powers_of_two() {
        for requested in [2, 4, 1024, 65536] {
            let capacity = Capacity::new(requested).unwrap();
            assert_eq!(capacity.get(), requested);
            assert_eq!(capacity.mask(), requested - 1);
        }
    }

    #[test]
    fn test_at_least_rounds_up() {
        assert_eq!(Capacity::at_least(0).unwrap().get(), 2);
        assert_eq!(Capacity::at_least(2).unwrap().get(), 2);
        assert_eq!(Capacity::at_least(3).unwrap().get(), 4);
        assert_eq!(Capacity::at_least(1000).unwrap().get(), 1024);
        assert_eq!(Capacity::at_least(1024).unwrap().get(), 1024);
        assert_eq!(
            Capacity::at_least(usize::MAX),
            Err(CapacityError::Overflow {
                requested: usize::MAX
            })
        );
    }

    #[test]
    fn test_parse_from_config_text() {
        assert_eq!("4096".parse::<Capacity>().unwrap().get(), 4096);
        assert_eq!(" 8 ".parse::<Capacity>().unwrap().get(), 8);
        assert_eq!(
            "12".parse::<Capacity>(),
            Err(CapacityError::NotPowerOfTwo { requested: 12 })
        );
        assert!(matches!(
            "lots".parse::<Capacity>(),
            Err(CapacityError::Parse { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CapacityError::TooSmall { requested: 1 }.to_string(),
            "capacity 1 is too small, minimum is 2"
        );
        assert_eq!(
            CapacityError::NotPowerOfTwo { requested: 3 }.to_string(),
            "capacity 3 is not a power of two"
        );
    }
}
