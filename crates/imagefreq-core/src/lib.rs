pub mod consts;
pub mod error;
pub mod image;
pub mod filters;
pub mod transform;
pub mod denoise;
pub mod sharpen;
pub mod psf;
pub mod pipeline;
pub mod validation;
