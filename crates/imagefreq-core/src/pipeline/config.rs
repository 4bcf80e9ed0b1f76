use serde::{Deserialize, Serialize};

use crate::denoise::mlt::{MltDenoiseParams, MltParams};
use crate::denoise::threshold::ThresholdMode;
use crate::denoise::wavelet::WaveletDenoiseParams;
use crate::error::Result;
use crate::sharpen::deconvolution::DeconvolutionConfig;
use crate::sharpen::wavelet::WaveletSharpenParams;

/// An ordered recipe of in-memory operations applied to one channel.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProcessingConfig {
    #[serde(default)]
    pub steps: Vec<ProcessStep>,
}

impl ProcessingConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ProcessStep {
    GaussianBlur {
        sigma: f64,
    },
    WaveletDenoise(WaveletDenoiseParams),
    SwtDenoise {
        /// Noise-sigma multiplier per level; its length sets the level count.
        sigmas: Vec<f32>,
        #[serde(default)]
        mode: ThresholdMode,
    },
    MltDenoise(MltDenoiseParams),
    MltGain(MltParams),
    Sharpen(WaveletSharpenParams),
    Deconvolve(DeconvolutionConfig),
}

impl std::fmt::Display for ProcessStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GaussianBlur { sigma } => write!(f, "Gaussian blur (sigma {sigma})"),
            Self::WaveletDenoise(p) => write!(f, "Wavelet denoise ({} levels)", p.levels),
            Self::SwtDenoise { sigmas, mode } => {
                write!(f, "SWT denoise ({} levels, {mode})", sigmas.len())
            }
            Self::MltDenoise(p) => write!(f, "MLT denoise ({} levels)", p.levels),
            Self::MltGain(p) => write!(f, "MLT gain/bias ({} levels)", p.gain.len()),
            Self::Sharpen(p) => write!(f, "Wavelet sharpen ({} layers)", p.num_layers),
            Self::Deconvolve(c) => write!(f, "Richardson-Lucy ({} iterations)", c.iterations),
        }
    }
}
