mod card_repository;

pub use card_repository::CardRepository;
