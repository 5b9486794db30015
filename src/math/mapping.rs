//! Linear range mapping and the brightness-to-scale curve

use num_traits::Float;

/// Lower end of the mapped scale range (brightness 0)
pub const SCALE_RANGE_MIN: f64 = 0.1;
/// Upper end of the mapped scale range (brightness 255)
pub const SCALE_RANGE_MAX: f64 = 1.0;
/// Smallest scale a stamp is ever drawn at
pub const SCALE_CLAMP_MIN: f64 = 0.1;
/// Largest scale a stamp is ever drawn at
///
/// Above [`SCALE_RANGE_MAX`], so only a positive bias can reach it.
pub const SCALE_CLAMP_MAX: f64 = 1.5;
/// Largest possible brightness value
pub const BRIGHTNESS_MAX: f64 = 255.0;

/// Re-map `value` from `[in_min, in_max]` onto `[out_min, out_max]`
///
/// The mapping is not clamped, so values outside the input range
/// extrapolate. A degenerate input range maps everything to `out_min`.
pub fn map_range<T: Float>(value: T, in_min: T, in_max: T, out_min: T, out_max: T) -> T {
    let span = in_max - in_min;
    if span == T::zero() {
        return out_min;
    }
    out_min + (out_max - out_min) * ((value - in_min) / span)
}

/// Restrict `value` to `[min, max]`; NaN collapses to `min`
pub fn clamp<T: Float>(value: T, min: T, max: T) -> T {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Stamp scale for a brightness in `[0, 255]`
///
/// Brightness maps linearly onto `[0.1, 1.0]`, `bias` is added, and the
/// result is clamped to `[0.1, 1.5]`.
pub fn brightness_to_scale(brightness: f64, bias: f64) -> f64 {
    let mapped = map_range(
        brightness,
        0.0,
        BRIGHTNESS_MAX,
        SCALE_RANGE_MIN,
        SCALE_RANGE_MAX,
    );
    clamp(mapped + bias, SCALE_CLAMP_MIN, SCALE_CLAMP_MAX)
}
