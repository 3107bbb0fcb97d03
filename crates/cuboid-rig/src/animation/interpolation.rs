//! Keyframe interpolation for pose tracks

use super::types::Lerp;

/// How values between two keyframes are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Hold the earlier keyframe until the next one
    Step,
    /// Linear blend between the bracketing keyframes
    #[default]
    Linear,
}

/// Find the index of the keyframe at or before the given time
///
/// Returns None if the track has no keyframes.
/// For interpolation, this returns the index of the earlier keyframe
/// in the bracketing pair (so we can interpolate between `[index]` and `[index+1]`).
pub fn find_timestamp_index(timestamps: &[f64], time: f64) -> Option<usize> {
    if timestamps.is_empty() {
        return None;
    }

    let last_index = timestamps.len() - 1;
    if last_index == 0 || time >= timestamps[last_index] {
        return Some(last_index);
    }

    // Largest index where timestamps[index] <= time
    let mut low = 0;
    let mut high = last_index;
    while low < high {
        let mid = (low + high).div_ceil(2);
        if timestamps[mid] <= time {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Some(low)
}

/// Interpolate a keyframed value at the given time
///
/// `timestamps` must be sorted ascending and parallel to `values`. Times
/// before the first keyframe clamp to it, times after the last clamp to the
/// last.
pub fn interpolate_keyframes<T: Lerp>(
    timestamps: &[f64],
    values: &[T],
    time: f64,
    interpolation: Interpolation,
) -> Option<T> {
    if timestamps.len() != values.len() {
        return None;
    }
    let index = find_timestamp_index(timestamps, time)?;
    if index >= timestamps.len() - 1 {
        return values.last().cloned();
    }

    let time1 = timestamps[index];
    let time2 = timestamps[index + 1];
    let value1 = &values[index];
    let value2 = &values[index + 1];

    match interpolation {
        Interpolation::Step => Some(value1.clone()),
        Interpolation::Linear => {
            let t = if time2 > time1 {
                (time - time1) / (time2 - time1)
            } else {
                0.0
            };
            Some(value1.lerp(value2, t.clamp(0.0, 1.0)))
        }
    }
}
