//! User Handlers

pub(crate) mod account;
pub(crate) mod login;
pub(crate) mod register;
