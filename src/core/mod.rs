//! Core module: Lock-Free SPSC Ring Buffer
//!
//! Prinsip desain:
//! - Lock-Free: Hanya atomic load/store, tidak ada Mutex/RwLock/CAS
//! - No-Allocation: Storage pre-allocated saat init
//! - Non-Blocking: Penuh/kosong dilaporkan lewat return value, tidak pernah menunggu

mod cache_line;
mod capacity;
mod ring_buffer;
mod sync;

pub use cache_line::{CacheLinePadded, CACHE_LINE_SIZE};
pub use capacity::{Capacity, CapacityError};
pub use ring_buffer::{Consumer, Producer, RingBuffer};
