//! Stereo mixing of delayed, panned mono layers.
//!
//! The renderer schedules every triggered event as one [`Layer`] whose
//! `delay_samples` places it on the virtual transport clock; mixing the
//! layers realizes the whole schedule in one pass. Equal-power panning
//! positions each voice in the stereo field.

use std::f32::consts::FRAC_PI_4;

/// A mono event with mixing parameters and a start offset.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Audio samples of the event.
    pub samples: Vec<f32>,
    /// Volume level (0.0 to 1.0).
    pub volume: f32,
    /// Stereo pan (-1.0 = left, 0.0 = center, 1.0 = right).
    pub pan: f32,
    /// Offset in samples before this layer starts.
    pub delay_samples: usize,
}

impl Layer {
    /// Creates a centered layer.
    pub fn new(samples: Vec<f32>, volume: f32) -> Self {
        Self {
            samples,
            volume: volume.clamp(0.0, 1.0),
            pan: 0.0,
            delay_samples: 0,
        }
    }

    /// Sets the stereo pan.
    pub fn with_pan(mut self, pan: f32) -> Self {
        self.pan = pan.clamp(-1.0, 1.0);
        self
    }

    /// Sets the start offset in samples.
    pub fn at_sample(mut self, delay_samples: usize) -> Self {
        self.delay_samples = delay_samples;
        self
    }
}

/// A working stereo buffer, mutable while the signal chain runs.
#[derive(Debug, Clone)]
pub struct StereoOutput {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoOutput {
    /// Creates a silent stereo buffer.
    pub fn silent(num_samples: usize) -> Self {
        Self {
            left: vec![0.0; num_samples],
            right: vec![0.0; num_samples],
        }
    }

    /// Duplicates mono samples onto both channels.
    pub fn from_mono(mono: Vec<f32>) -> Self {
        Self {
            left: mono.clone(),
            right: mono,
        }
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Accumulates layers and mixes them into a stereo buffer.
#[derive(Debug)]
pub struct Mixer {
    num_samples: usize,
    layers: Vec<Layer>,
}

impl Mixer {
    /// Creates a mixer producing `num_samples` frames.
    pub fn new(num_samples: usize) -> Self {
        Self {
            num_samples,
            layers: Vec::new(),
        }
    }

    /// Adds a layer. Samples past the end of the output are dropped.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Number of frames this mixer produces.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Mixes all layers with equal-power panning.
    pub fn mix(&self) -> StereoOutput {
        let mut output = StereoOutput::silent(self.num_samples);

        for layer in &self.layers {
            let pan_angle = (layer.pan + 1.0) * FRAC_PI_4;
            let left_gain = pan_angle.cos() * layer.volume;
            let right_gain = pan_angle.sin() * layer.volume;

            for (i, &sample) in layer.samples.iter().enumerate() {
                let idx = layer.delay_samples + i;
                if idx >= self.num_samples {
                    break;
                }
                output.left[idx] += sample * left_gain;
                output.right[idx] += sample * right_gain;
            }
        }

        output
    }
}

/// Normalizes stereo audio to a peak at the given headroom below 0 dBFS.
pub fn normalize_stereo(stereo: &mut StereoOutput, headroom_db: f32) {
    let target_peak = 10.0_f32.powf(headroom_db / 20.0);
    let peak = stereo
        .left
        .iter()
        .chain(stereo.right.iter())
        .map(|s| s.abs())
        .fold(0.0_f32, f32::max);

    if peak > 0.0 {
        let gain = target_peak / peak;
        for sample in stereo.left.iter_mut().chain(stereo.right.iter_mut()) {
            *sample *= gain;
        }
    }
}

/// Soft-clips one sample above the threshold.
#[inline]
pub fn soft_clip(sample: f32, threshold: f32) -> f32 {
    let abs = sample.abs();
    if abs <= threshold {
        sample
    } else {
        let excess = abs - threshold;
        let compressed = threshold + (1.0 - threshold) * (1.0 - (-excess * 3.0).exp());
        sample.signum() * compressed
    }
}

/// Soft-clips a stereo buffer in place.
pub fn soft_clip_stereo(stereo: &mut StereoOutput, threshold: f32) {
    for sample in stereo.left.iter_mut().chain(stereo.right.iter_mut()) {
        *sample = soft_clip(*sample, threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_places_layer_on_the_clock() {
        let mut mixer = Mixer::new(10);
        mixer.add_layer(Layer::new(vec![1.0, 1.0], 1.0).at_sample(4));

        let out = mixer.mix();
        assert_eq!(out.left[3], 0.0);
        assert!(out.left[4] > 0.0);
        assert!(out.left[5] > 0.0);
        assert_eq!(out.left[6], 0.0);
    }

    #[test]
    fn test_layers_past_the_end_are_dropped() {
        let mut mixer = Mixer::new(4);
        mixer.add_layer(Layer::new(vec![1.0; 100], 1.0).at_sample(2));
        let out = mixer.mix();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_center_pan_is_equal_power() {
        let mut mixer = Mixer::new(1);
        mixer.add_layer(Layer::new(vec![1.0], 1.0));
        let out = mixer.mix();

        assert!((out.left[0] - out.right[0]).abs() < 1e-6);
        // cos(pi/4) on both sides
        assert!((out.left[0] - FRAC_PI_4.cos()).abs() < 1e-6);
    }

    #[test]
    fn test_hard_left_pan() {
        let mut mixer = Mixer::new(1);
        mixer.add_layer(Layer::new(vec![1.0], 1.0).with_pan(-1.0));
        let out = mixer.mix();

        assert!((out.left[0] - 1.0).abs() < 1e-6);
        assert!(out.right[0].abs() < 1e-6);
    }

    #[test]
    fn test_overlapping_layers_sum() {
        let mut mixer = Mixer::new(3);
        mixer.add_layer(Layer::new(vec![0.25; 3], 1.0));
        mixer.add_layer(Layer::new(vec![0.25; 2], 1.0).at_sample(1));

        let out = mixer.mix();
        assert!(out.left[1] > out.left[0]);
    }

    #[test]
    fn test_normalize_hits_target() {
        let mut stereo = StereoOutput {
            left: vec![0.1, -0.2, 0.05],
            right: vec![0.0, 0.1, -0.1],
        };
        normalize_stereo(&mut stereo, -3.0);

        let peak = stereo
            .left
            .iter()
            .chain(stereo.right.iter())
            .map(|s| s.abs())
            .fold(0.0_f32, f32::max);
        assert!((peak - 10.0_f32.powf(-3.0 / 20.0)).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_leaves_silence_alone() {
        let mut stereo = StereoOutput::silent(8);
        normalize_stereo(&mut stereo, -3.0);
        assert!(stereo.left.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_soft_clip_bounds_output() {
        for &sample in &[0.5_f32, 1.5, -2.5, 10.0] {
            let clipped = soft_clip(sample, 0.8);
            assert!(clipped.abs() <= 1.0);
        }
        // Below threshold passes through untouched
        assert_eq!(soft_clip(0.5, 0.8), 0.5);
    }
}
