pub mod api;
pub mod config;
pub mod controller;
pub mod html;
pub mod map;
pub mod model;
pub mod risk;
