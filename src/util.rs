//! Small shared helpers.

/// Evaluate an expression and log how long it took at debug level.
///
/// ```
/// let sum = hexmap_generator::timed!("Summing", (0..10).sum::<i32>());
/// assert_eq!(sum, 45);
/// ```
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {{
        let start = ::std::time::Instant::now();
        let value = $ex;
        ::log::debug!("{} took {:?}", $label, start.elapsed());
        value
    }};
}

/// Round `total * percent / 100` to the nearest whole cell count.
pub fn percent_of(total: usize, percent: u32) -> usize {
    (total as f64 * f64::from(percent) * 0.01).round() as usize
}
