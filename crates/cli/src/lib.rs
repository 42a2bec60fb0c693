//! LXGW JB Nerd Font CLI library.

pub mod cli;
pub mod commands;
