pub mod availability;
pub mod date_range;
pub mod draft;
pub mod error;
pub mod format;
pub mod guest;
pub mod owner;
pub mod payment;
pub mod pricing;
pub mod promo;
pub mod rates;
pub mod selection;

pub use availability::*;
pub use date_range::*;
pub use draft::*;
pub use error::*;
pub use format::*;
pub use guest::*;
pub use owner::*;
pub use payment::*;
pub use pricing::*;
pub use promo::*;
pub use rates::*;
pub use selection::*;
