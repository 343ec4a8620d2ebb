//! # Sea State Classification
//!
//! Buckets a significant wave height into the 0-9 sea state scale.
//!
//! | State | Wave height (m) |
//! |-------|-----------------|
//! | 0     | ≤ 0.0           |
//! | 1     | (0.0, 0.1]      |
//! | 2     | (0.1, 0.5]      |
//! | 3     | (0.5, 1.25]     |
//! | 4     | (1.25, 2.5]     |
//! | 5     | (2.5, 4.0]      |
//! | 6     | (4.0, 6.0]      |
//! | 7     | (6.0, 9.0]      |
//! | 8     | (9.0, 14.0]     |
//! | 9     | > 14.0          |

use tracing::debug;

/// Highest sea state on the scale
pub const MAX_SEA_STATE: u8 = 9;

/// Inclusive upper wave height (meters) of each state, ascending by state.
const SEA_STATES: [(u8, f64); 10] = [
    (0, 0.0),
    (1, 0.1),
    (2, 0.5),
    (3, 1.25),
    (4, 2.5),
    (5, 4.0),
    (6, 6.0),
    (7, 9.0),
    (8, 14.0),
    (9, f64::INFINITY),
];

/// Sea state for a wave height in meters.
///
/// Heights on a bucket boundary belong to the lower state and negative heights
/// are state 0. NaN falls through every bucket and reports the top state.
///
/// # Example
/// ```
/// use nautical_lib::sea_state::classify;
///
/// assert_eq!(classify(0.1), 1);
/// assert_eq!(classify(3.2), 5);
/// ```
pub fn classify(wave_height_m: f64) -> u8 {
    let state = SEA_STATES
        .iter()
        .find(|(_, max_height)| wave_height_m <= *max_height)
        .map_or(MAX_SEA_STATE, |(state, _)| *state);

    debug!(wave_height_m, state, "sea state");
    state
}

/// Inclusive upper wave height of a state, `None` past the top of the scale.
pub fn upper_bound(state: u8) -> Option<f64> {
    SEA_STATES.get(usize::from(state)).map(|(_, max_height)| *max_height)
}
