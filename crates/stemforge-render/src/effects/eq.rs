//! Three-band equalizer.
//!
//! A fixed topology matching the mastering styles: low shelf at 200 Hz,
//! peaking band at 1 kHz, high shelf at 4 kHz, each with its own gain.
//! Cascaded biquads, separate filter state per channel.

use crate::filter::{BiquadCoeffs, BiquadFilter};
use crate::mixer::StereoOutput;

/// Low-shelf corner frequency in Hz.
pub const LOW_SHELF_HZ: f32 = 200.0;

/// Mid-peak center frequency in Hz.
pub const MID_PEAK_HZ: f32 = 1000.0;

/// High-shelf corner frequency in Hz.
pub const HIGH_SHELF_HZ: f32 = 4000.0;

const MID_Q: f32 = 1.0;

/// Applies the three-band EQ to stereo audio in place.
///
/// Gains are clamped to ±24 dB. Bands with zero gain still run so the
/// signal path is identical for every style.
pub fn apply(
    stereo: &mut StereoOutput,
    low_db: f32,
    mid_db: f32,
    high_db: f32,
    sample_rate: f32,
) {
    let bands = [
        BiquadCoeffs::low_shelf(LOW_SHELF_HZ, low_db.clamp(-24.0, 24.0), sample_rate),
        BiquadCoeffs::peaking(MID_PEAK_HZ, MID_Q, mid_db.clamp(-24.0, 24.0), sample_rate),
        BiquadCoeffs::high_shelf(HIGH_SHELF_HZ, high_db.clamp(-24.0, 24.0), sample_rate),
    ];

    let mut filters: Vec<(BiquadFilter, BiquadFilter)> = bands
        .iter()
        .map(|&coeffs| (BiquadFilter::new(coeffs), BiquadFilter::new(coeffs)))
        .collect();

    for i in 0..stereo.left.len() {
        let mut left = stereo.left[i];
        let mut right = stereo.right[i];

        for (filter_l, filter_r) in &mut filters {
            left = filter_l.process(left);
            right = filter_r.process(right);
        }

        stereo.left[i] = left;
        stereo.right[i] = right;
    }
}
