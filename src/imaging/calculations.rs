//! Pure calculation functions for poster geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Width/height ratio of an A4 sheet in portrait orientation (1/√2).
pub const A4_PORTRAIT_RATIO: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Width divided by height.
///
/// A zero height yields `f64::INFINITY` (or NaN for 0×0), which never passes
/// [`is_within_tolerance`].
///
/// # Examples
/// ```
/// # use poster_gal::imaging::aspect_ratio;
/// assert!((aspect_ratio(1190, 1684) - 0.7066).abs() < 0.0001);
/// assert_eq!(aspect_ratio(1000, 1000), 1.0);
/// ```
pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    width as f64 / height as f64
}

/// Whether `ratio` is strictly closer than `tolerance` to `target`.
///
/// The boundary itself is rejected: `|ratio - target| >= tolerance` fails.
pub fn is_within_tolerance(ratio: f64, target: f64, tolerance: f64) -> bool {
    (ratio - target).abs() < tolerance
}
