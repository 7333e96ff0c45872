mod client;
mod upsert;
mod utils;
