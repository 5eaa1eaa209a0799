//! The seven intensity transforms, their lookup tables, and the front-end
//! parameter model.

pub mod contrast;
pub mod equalize;
pub mod lut;
pub mod params;
pub mod point;
pub mod slice;
