#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use hybrid_image as image;

#[doc(inline)]
pub use hybrid_imgproc as imgproc;
