pub mod cancel;
pub mod validation;

pub use cancel::CancelToken;
