pub mod heap;
pub mod scorer;
