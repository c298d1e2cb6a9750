pub mod serve;
pub mod tenant;
pub mod token;
