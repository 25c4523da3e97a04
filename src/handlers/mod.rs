// Movie catalog handlers
//
// Reads are public and go through the output cache; writes pass the
// authorization layer attached in `app::router` and evict the "movies"
// cache tag once the write has committed.
pub mod health;
pub mod movies;
pub mod ratings;
