use core::future::Future;
use core::time::Duration;
use jackpot_core::Sleep;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Pauses the ambient sweep on the browser's timer queue.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct TimerSleep;

impl Sleep for TimerSleep {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()> {
        gloo::timers::future::sleep(delay)
    }
}

/// Prefixes an already formatted amount with the currency sign.
pub(crate) fn price_label(formatted: &str) -> String {
    format!("€ {}", formatted)
}
