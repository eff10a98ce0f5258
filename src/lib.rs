//! chirpy - a small file-backed chirp posting service
//!
//! Clients post short text messages ("chirps"). Each chirp is checked
//! against a 140 character limit, run through a profanity filter, stored
//! with a sequential id, and returned. All chirps can be listed in id order.

pub mod api;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod policy;
pub mod storage;
