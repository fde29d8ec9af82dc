//! Tracing untuk debugging spsc-ring.
//!
//! Aktifkan dengan `--features tracing`. Tanpa feature tersebut semua macro
//! menjadi no-op. Hot path (`push`/`pop`) tidak pernah melakukan logging.

/// Memasang subscriber `tracing` dengan timestamp uptime.
///
/// Filter diambil dari `RUST_LOG`, default `spsc_ring=debug`. Aman dipanggil
/// berkali-kali (mis. dari beberapa test dalam satu binary); panggilan kedua
/// diabaikan.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spsc_ring=debug"));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_names(true)
                .with_timer(fmt::time::uptime()),
        )
        .with(filter)
        .try_init();
}

/// No-op: feature `tracing` tidak aktif.
#[cfg(not(feature = "tracing"))]
pub const fn init_tracing() {}

#[cfg(feature = "tracing")]
pub(crate) use tracing::debug;

#[cfg(not(feature = "tracing"))]
macro_rules! debug_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use debug_noop as debug;
