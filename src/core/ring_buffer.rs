//! Lock-Free Single-Producer Single-Consumer (SPSC) Ring Buffer
//!
//! Implementasi Lamport Queue: producer hanya menulis `head`, consumer hanya
//! menulis `tail`. Tidak ada Mutex, tidak ada CAS, tidak ada alokasi setelah
//! inisialisasi.
//!
//! Dua cara pakai:
//! - [`RingBuffer`] dimiliki satu thread: `push`/`pop` lewat `&mut self`.
//! - [`RingBuffer::split`] menghasilkan [`Producer`] dan [`Consumer`] yang bisa
//!   dipindah ke thread masing-masing. Keduanya bukan `Clone` dan butuh
//!   `&mut self`, jadi kontrak single-producer/single-consumer dijaga compiler.

use std::fmt;

use super::cache_line::CacheLinePadded;
use super::capacity::{Capacity, CapacityError};
use super::sync::{Arc, AtomicU64, Ordering, UnsafeCell};
use crate::trace::debug;

/// State bersama antara producer dan consumer.
#[repr(C)]
struct Ring<T> {
    // Producer side: jumlah elemen yang pernah di-push
    head: CacheLinePadded<AtomicU64>,
    // Consumer side: jumlah elemen yang pernah di-pop
    tail: CacheLinePadded<AtomicU64>,
    capacity: u64,
    // capacity - 1, pengganti modulo
    mask: u64,
    // Pre-allocated di heap, panjang tetap `capacity`
    storage: Box<[UnsafeCell<T>]>,
}

// SAFETY: Ring aman untuk Send/Sync karena:
// - Hanya satu producer yang menulis head dan slot yang belum dipublikasikan
// - Hanya satu consumer yang menulis tail dan membaca slot yang sudah dipublikasikan
// - Pasangan Release/Acquire pada cursor menjamin visibility isi slot
// Eksklusivitas peran dijamin oleh `&mut self` di RingBuffer/Producer/Consumer.
unsafe impl<T: Send> Send for Ring<T> {}
unsafe impl<T: Send> Sync for Ring<T> {}

impl<T: Copy + Default> Ring<T> {
    fn new(capacity: Capacity) -> Self {
        let storage: Box<[UnsafeCell<T>]> = (0..capacity.get())
            .map(|_| UnsafeCell::new(T::default()))
            .collect();

        debug!(
            capacity = capacity.get(),
            slot_bytes = std::mem::size_of::<T>(),
            "ring buffer allocated"
        );

        Self {
            head: CacheLinePadded::new(AtomicU64::new(0)),
            tail: CacheLinePadded::new(AtomicU64::new(0)),
            capacity: capacity.get() as u64,
            mask: capacity.mask() as u64,
            storage,
        }
    }

    /// # Safety
    /// Tidak boleh ada dua pemanggilan `push` yang berjalan bersamaan.
    #[inline(always)]
    unsafe fn push(&self, value: T) -> bool {
        // Hanya producer yang menulis head, Relaxed cukup
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        debug_assert!(head.wrapping_sub(tail) <= self.capacity);

        if head.wrapping_sub(tail) == self.capacity {
            return false;
        }

        let slot = &self.storage[(head & self.mask) as usize];
        // SAFETY: slot ini sudah di-pop (Acquire pada tail di atas) dan consumer
        // tidak akan membacanya sebelum head baru dipublikasikan.
        slot.with_mut(|ptr| unsafe { ptr.write(value) });

        // Release: write slot di atas visible sebelum head baru terlihat
        self.head.store(head.wrapping_add(1), Ordering::Release);
        true
    }

    /// # Safety
    /// Tidak boleh ada dua pemanggilan `pop` yang berjalan bersamaan.
    #[inline(always)]
    unsafe fn pop(&self) -> Option<T> {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Relaxed);

        if tail == head {
            return None;
        }

        let slot = &self.storage[(tail & self.mask) as usize];
        // SAFETY: head > tail dengan Acquire, jadi write producer ke slot ini
        // sudah visible dan producer tidak menyentuhnya sampai tail maju.
        let value = slot.with(|ptr| unsafe { ptr.read() });

        // Release: read slot selesai sebelum producer boleh menimpanya
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Some(value)
    }
}

impl<T> Ring<T> {
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.capacity as usize
    }

    /// Snapshot jumlah elemen. Tail dibaca lebih dulu: head monoton naik,
    /// jadi selisihnya tidak pernah negatif; clamp menutup kasus head yang
    /// sudah maju lebih jauh dari tail lama.
    #[inline(always)]
    fn len(&self) -> usize {
        let tail = self.tail.load(Ordering::Acquire);
        let head = self.head.load(Ordering::Acquire);
        head.wrapping_sub(tail).min(self.capacity) as usize
    }
}

/// Lock-Free SPSC Ring Buffer untuk nilai fixed-size (default `u64`).
///
/// Selama masih berupa `RingBuffer`, hanya satu owner yang memegangnya.
/// Gunakan [`RingBuffer::split`] untuk handoff antar-thread.
pub struct RingBuffer<T = u64> {
    ring: Ring<T>,
}

impl<T: Copy + Default + Send> RingBuffer<T> {
    /// Membuat ring buffer baru dengan storage terisi `T::default()`.
    ///
    /// Alokasi hanya terjadi sekali di sini; push/pop tidak pernah alokasi.
    ///
    /// # Panics
    /// Panic jika `capacity` bukan power of 2 atau kurang dari 2. Ini error
    /// konfigurasi; gunakan [`RingBuffer::try_new`] untuk menanganinya.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(rb) => rb,
            Err(err) => panic!("invalid ring buffer capacity: {err}"),
        }
    }

    /// Seperti [`RingBuffer::new`], tapi capacity invalid dikembalikan sebagai error.
    pub fn try_new(capacity: usize) -> Result<Self, CapacityError> {
        Capacity::new(capacity).map(Self::with_capacity)
    }

    /// Membuat ring buffer dari [`Capacity`] yang sudah tervalidasi.
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self {
            ring: Ring::new(capacity),
        }
    }

    /// Push ke buffer. Returns `false` jika buffer penuh (tidak ada perubahan).
    #[inline(always)]
    pub fn push(&mut self, value: T) -> bool {
        // SAFETY: &mut self menjamin tidak ada push/pop lain yang berjalan
        unsafe { self.ring.push(value) }
    }

    /// Pop dari buffer. Returns `None` jika buffer kosong.
    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        // SAFETY: &mut self menjamin tidak ada push/pop lain yang berjalan
        unsafe { self.ring.pop() }
    }

    /// Pisahkan menjadi handle producer dan consumer.
    ///
    /// Elemen yang sudah ada di buffer tetap tersedia untuk consumer.
    /// Storage dibebaskan setelah kedua handle di-drop.
    pub fn split(self) -> (Producer<T>, Consumer<T>) {
        debug!(
            capacity = self.ring.capacity(),
            len = self.ring.len(),
            "ring buffer split into producer/consumer"
        );

        let ring = Arc::new(self.ring);
        (
            Producer {
                ring: Arc::clone(&ring),
            },
            Consumer { ring },
        )
    }
}

impl<T> RingBuffer<T> {
    /// Kapasitas buffer
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Jumlah elemen dalam buffer
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Cek apakah buffer kosong
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cek apakah buffer penuh
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }
}

impl<T> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

/// Handle sisi producer. Hanya ada satu per ring buffer.
pub struct Producer<T = u64> {
    ring: Arc<Ring<T>>,
}

impl<T: Copy + Default + Send> Producer<T> {
    /// Push ke buffer. Returns `false` jika penuh; retry/backoff urusan caller.
    #[inline(always)]
    pub fn push(&mut self, value: T) -> bool {
        // SAFETY: Producer bukan Clone dan push butuh &mut self
        unsafe { self.ring.push(value) }
    }
}

impl<T> Producer<T> {
    /// Kapasitas buffer
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Jumlah elemen yang belum di-pop. Dari sisi producer nilai ini bisa
    /// sudah berkurang saat dibaca, tapi tidak pernah lebih kecil dari
    /// kenyataan.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Cek apakah buffer kosong
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cek apakah buffer penuh
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }
}

impl<T> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

/// Handle sisi consumer. Hanya ada satu per ring buffer.
pub struct Consumer<T = u64> {
    ring: Arc<Ring<T>>,
}

impl<T: Copy + Default + Send> Consumer<T> {
    /// Pop dari buffer. Returns `None` jika kosong; polling urusan caller.
    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        // SAFETY: Consumer bukan Clone dan pop butuh &mut self
        unsafe { self.ring.pop() }
    }
}

impl<T> Consumer<T> {
    /// Kapasitas buffer
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Jumlah elemen yang siap di-pop. Dari sisi consumer nilai ini bisa
    /// sudah bertambah saat dibaca, tapi tidak pernah lebih besar dari
    /// kenyataan.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Cek apakah buffer kosong
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cek apakah buffer penuh
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }
}

impl<T> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}
