pub mod contact_message_repo;

pub use contact_message_repo::ContactMessageRepo;
