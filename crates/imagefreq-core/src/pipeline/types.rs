use super::config::ProcessStep;

/// Processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessingStage {
    Blurring,
    Denoising,
    Sharpening,
    Deconvolving,
}

impl ProcessingStage {
    pub fn of(step: &ProcessStep) -> Self {
        match step {
            ProcessStep::GaussianBlur { .. } => Self::Blurring,
            ProcessStep::WaveletDenoise(_)
            | ProcessStep::SwtDenoise { .. }
            | ProcessStep::MltDenoise(_) => Self::Denoising,
            ProcessStep::MltGain(_) | ProcessStep::Sharpen(_) => Self::Sharpening,
            ProcessStep::Deconvolve(_) => Self::Deconvolving,
        }
    }
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blurring => write!(f, "Blurring"),
            Self::Denoising => write!(f, "Denoising"),
            Self::Sharpening => write!(f, "Sharpening"),
            Self::Deconvolving => write!(f, "Deconvolving"),
        }
    }
}

/// Thread-safe progress reporting for a processing run.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A step has started. `index` counts from 0 out of `total` steps.
    fn begin_step(&self, _stage: ProcessingStage, _index: usize, _total: usize) {}

    /// The current step is finished.
    fn finish_step(&self) {}
}

/// No-op progress reporter, used when `run_steps` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
