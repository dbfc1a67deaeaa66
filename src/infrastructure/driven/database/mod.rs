mod indexes;
mod mongo_store;

pub use indexes::ensure_indexes;
pub use mongo_store::MongoStore;
