//! core/rating.rs
//! Conversion between the 0..=5 star scale and the 0..=255 POPM rating byte.
//!
//! The mapping is banded, not linear:
//!
//! | stars | written as | read back from |
//! |-------|------------|----------------|
//! | 0     | 0          | `..1`          |
//! | 1     | 1          | `1..32`        |
//! | 2     | 64         | `32..96`       |
//! | 3     | 128        | `96..160`      |
//! | 4     | 196        | `160..224`     |
//! | 5     | 255        | `224..=255`    |

use super::error::{Result, SyncError};

/// Rating byte written for each star value (index = stars).
const STAR_RATINGS: [u8; 6] = [0, 1, 64, 128, 196, 255];

/// Exclusive upper bound of each star band, stars 0..=4.
const STAR_BANDS: [i64; 5] = [1, 32, 96, 160, 224];

pub fn stars_to_rating(stars: i64) -> Result<u8> {
    usize::try_from(stars)
        .ok()
        .and_then(|i| STAR_RATINGS.get(i).copied())
        .ok_or_else(|| SyncError::InvalidInput(format!("unknown stars value: {stars}")))
}

/// Negative ratings fall into the 0-star band; only values above 255 fail.
pub fn rating_to_stars(rating: i64) -> Result<u8> {
    if rating > 255 {
        return Err(SyncError::InvalidInput(format!(
            "unknown rating value: {rating}"
        )));
    }

    let stars = STAR_BANDS
        .iter()
        .position(|&upper| rating < upper)
        .unwrap_or(STAR_BANDS.len());
    Ok(stars as u8)
}
