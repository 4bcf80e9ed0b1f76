pub mod mlt;
pub mod stats;
pub mod threshold;
pub mod wavelet;

pub use mlt::{apply_mlt, mlt_denoise, MltDenoiseParams, MltParams};
pub use stats::{estimate_noise, mad, median, NoiseEstimate};
pub use threshold::{shrink, ThresholdMode};
pub use wavelet::{swt_denoise, wavelet_denoise, WaveletDenoiseParams};
