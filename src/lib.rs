pub mod assets;
pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod spawner;
