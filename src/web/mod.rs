pub mod server;

pub use server::{AppState, routes, run_server};
