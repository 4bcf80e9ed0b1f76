pub mod deconvolution;
pub mod wavelet;

pub use deconvolution::{deconvolve, richardson_lucy, DeconvolutionConfig, PsfSource};
pub use wavelet::{sharpen, WaveletSharpenParams};
