mod convert;
mod lookup;
mod properties;
