pub mod space_repo;

pub use space_repo::SpaceRepo;
