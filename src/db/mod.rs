pub mod catalog;
pub mod connection;
pub mod dao;
pub mod entities;
pub mod grid;
pub mod providers;
pub mod statements;
