use nalgebra::RealField;

/// 3D vector type, generic over the query precision.
pub type Vector3<T> = nalgebra::Vector3<T>;

/// Scalar precision a query runs in. Implemented for `f32` and `f64`.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

/// Converts an `f64` constant into the query precision.
#[must_use]
pub fn lit<T: Real>(value: f64) -> T {
    nalgebra::convert(value)
}

/// Widens a query scalar to `f64` for error reporting.
#[must_use]
pub fn widen<T: Real>(value: T) -> f64 {
    nalgebra::try_convert(value).unwrap_or(f64::NAN)
}

/// Returns whether every component of `v` is finite.
#[must_use]
pub fn is_finite_vector<T: Real>(v: &Vector3<T>) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Returns whether `t` lies in the closed interval `[0, t_max]`.
///
/// NaN is never in range.
#[must_use]
pub fn in_unit_range<T: Real>(t: T, t_max: T) -> bool {
    t >= T::zero() && t <= t_max
}
