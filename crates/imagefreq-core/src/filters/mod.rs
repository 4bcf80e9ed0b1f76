pub mod convolve;
pub mod gaussian_blur;
pub mod kernel;

pub use convolve::{convolve_1d, convolve_2d_generic, convolve_2d_separable, ConvolveAxis};
pub use gaussian_blur::gaussian_blur;
pub use kernel::{dilated_b3_kernel, flip_kernel_1d, gaussian_kernel, Kernel1D};
