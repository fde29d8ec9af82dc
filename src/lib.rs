//! spsc-ring - Lock-Free SPSC Ring Buffer
//!
//! Arsitektur:
//! - Lock-Free: Hanya atomic load/store, tanpa Mutex dan tanpa CAS
//! - No-Allocation: Storage dialokasikan sekali saat konstruksi
//! - Cache-Line Isolation: `head` dan `tail` di cache line terpisah
//!
//! ```
//! use spsc_ring::core::RingBuffer;
//!
//! let (mut producer, mut consumer) = RingBuffer::<u64>::new(1024).split();
//!
//! let handle = std::thread::spawn(move || {
//!     for i in 0..10_000u64 {
//!         while !producer.push(i) {
//!             std::hint::spin_loop();
//!         }
//!     }
//! });
//!
//! let mut expected = 0u64;
//! while expected < 10_000 {
//!     if let Some(v) = consumer.pop() {
//!         assert_eq!(v, expected);
//!         expected += 1;
//!     }
//! }
//! handle.join().unwrap();
//! ```

#![warn(missing_docs)]

pub mod core;
pub mod trace;

pub use crate::core::{Capacity, CapacityError, Consumer, Producer, RingBuffer};
