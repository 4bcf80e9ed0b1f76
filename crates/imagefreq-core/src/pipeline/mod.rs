pub mod config;
mod types;

use ndarray::Array2;
use tracing::info;

use crate::denoise::mlt::{apply_mlt, mlt_denoise};
use crate::denoise::wavelet::{swt_denoise, wavelet_denoise};
use crate::error::Result;
use crate::filters::gaussian_blur::gaussian_blur;
use crate::image::{validate_image, Channels};
use crate::sharpen::deconvolution::deconvolve;
use crate::sharpen::wavelet::sharpen;

pub use config::{ProcessStep, ProcessingConfig};
pub use types::{ProcessingStage, ProgressReporter};

use types::NoOpReporter;

/// Apply a single processing step to a channel.
pub fn apply_step(data: &Array2<f32>, step: &ProcessStep) -> Result<Array2<f32>> {
    match step {
        ProcessStep::GaussianBlur { sigma } => gaussian_blur(data, *sigma),
        ProcessStep::WaveletDenoise(params) => wavelet_denoise(data, params),
        ProcessStep::SwtDenoise { sigmas, mode } => swt_denoise(data, sigmas, *mode),
        ProcessStep::MltDenoise(params) => mlt_denoise(data, params),
        ProcessStep::MltGain(params) => apply_mlt(data, params),
        ProcessStep::Sharpen(params) => sharpen(data, params),
        ProcessStep::Deconvolve(config) => deconvolve(data, config),
    }
}

/// Run every step of the recipe in order. Each step consumes the previous
/// step's full output.
pub fn run_steps(data: &Array2<f32>, config: &ProcessingConfig) -> Result<Array2<f32>> {
    run_steps_reported(data, config, &NoOpReporter)
}

pub fn run_steps_reported(
    data: &Array2<f32>,
    config: &ProcessingConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Array2<f32>> {
    validate_image(data)?;

    let total = config.steps.len();
    let mut current = data.clone();
    for (index, step) in config.steps.iter().enumerate() {
        reporter.begin_step(ProcessingStage::of(step), index, total);
        current = apply_step(&current, step)?;
        info!(step = %step, index, "Processing step complete");
        reporter.finish_step();
    }

    Ok(current)
}

/// Run the recipe on every channel independently, one rayon task per channel.
pub fn process_channels(channels: &Channels, config: &ProcessingConfig) -> Result<Channels> {
    channels.try_map_parallel(|channel| run_steps(channel, config))
}
