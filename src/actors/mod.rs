// Actor catalogue: CRUD with a TTL cache in front of single reads

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use handlers::{create_actor, delete_actor, get_actor, list_actors, update_actor};
pub use models::{Actor, CreateActor, UpdateActor};
pub use repository::{ActorRepository, ActorStore};
pub use service::ActorService;
