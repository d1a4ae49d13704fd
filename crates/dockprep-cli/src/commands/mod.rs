pub mod conf;
pub mod split;
pub mod table;
