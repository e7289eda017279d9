pub mod bars;
pub mod reference;
pub mod trades;
