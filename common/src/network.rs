pub mod family;
pub mod prefix;
pub mod range;
