pub mod geocode;
pub mod map;
