pub mod analyst;

pub use analyst::Analyst;
