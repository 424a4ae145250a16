//! Repository implementations for all Shelf entities.

pub mod activity;
pub mod entry;
pub mod link;
pub mod memory;
pub mod quota;
pub mod share;
pub mod tag;
pub mod token;
pub mod user;

pub use activity::ActivityRepository;
pub use entry::EntryRepository;
pub use link::AccessLinkRepository;
pub use memory::MemoryNamespaceStore;
pub use quota::QuotaRepository;
pub use share::ShareRepository;
pub use tag::TagRepository;
pub use token::TokenRepository;
pub use user::UserRepository;
