pub mod mongo;
pub mod seed;
pub mod store;

pub use store::TravelStore;
