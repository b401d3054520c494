//! Storage abstraction for identity persistence

pub mod memory;
pub mod traits;

pub use memory::MemoryUserRepository;
pub use traits::UserRepository;
