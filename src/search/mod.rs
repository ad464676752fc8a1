pub mod trending;
pub mod results;
