//! Cache line isolation untuk cursor `head` dan `tail`.

use std::ops::Deref;

/// Lebar cache line yang diasumsikan (64 bytes pada x86-64 dan kebanyakan ARM).
pub const CACHE_LINE_SIZE: usize = 64;

/// Padding untuk cache line isolation.
///
/// Nilai di dalamnya selalu menempati cache line sendiri, sehingga write dari
/// core producer tidak meng-invalidate cache line milik consumer (false sharing).
#[repr(C, align(64))]
pub struct CacheLinePadded<T> {
    value: T,
}

impl<T> CacheLinePadded<T> {
    /// Bungkus `value` di cache line sendiri
    pub const fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> Deref for CacheLinePadded<T> {
    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &T {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;
    use std::sync::atomic::AtomicU64;

    #[test]
    fn test_padding_fills_whole_line() {
        assert_eq!(mem::align_of::<CacheLinePadded<AtomicU64>>(), CACHE_LINE_SIZE);
        assert_eq!(mem::size_of::<CacheLinePadded<AtomicU64>>(), CACHE_LINE_SIZE);
        assert_eq!(mem::size_of::<CacheLinePadded<u8>>(), CACHE_LINE_SIZE);
    }

    #[test]
    fn test_adjacent_values_never_share_a_line() {
        #[repr(C)]
        struct Pair {
            a: CacheLinePadded<AtomicU64>,
            b: CacheLinePadded<AtomicU64>,
        }

        let pair = Pair {
            a: CacheLinePadded::new(AtomicU64::new(0)),
            b: CacheLinePadded::new(AtomicU64::new(0)),
        };
        let a = &*pair.a as *const AtomicU64 as usize;
        let b = &*pair.b as *const AtomicU64 as usize;

        assert_eq!(a % CACHE_LINE_SIZE, 0);
        assert_eq!(b % CACHE_LINE_SIZE, 0);
        assert!(b - a >= CACHE_LINE_SIZE);
    }
}
