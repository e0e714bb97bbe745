pub mod color;
pub mod discount;
pub mod product;
pub mod size;
pub mod store;
pub mod variant;

pub use color::Color;
pub use discount::Discount;
pub use product::Product;
pub use size::Size;
pub use store::Store;
pub use variant::Variant;
