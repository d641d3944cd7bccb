// handlers/mod.rs - one module per resource
//
// users.rs      GET/POST /api/users
// exercises.rs  POST     /api/users/:id/exercises
// logs.rs       GET      /api/users/:id/logs
// health.rs     GET      /health
pub mod exercises;
pub mod health;
pub mod logs;
pub mod users;
