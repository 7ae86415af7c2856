pub mod card;
pub mod config;
pub mod constants;
pub mod error;
pub mod gate;
pub mod pile;
pub mod player;
pub mod rules;
pub mod sink;
pub mod table;
pub mod turn;
pub mod uno;
