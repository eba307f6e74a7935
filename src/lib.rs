//! Portal B2B multi-cliente: autentica usuários e resolve quais dashboards
//! externos (embeds) o perfil de cada um pode abrir.

pub mod app;
pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
