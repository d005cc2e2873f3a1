//! Notes API access for the browser build.

pub mod client;

pub use client::{create_note, delete_note, fetch_notes, get_api_base, send_prompt, set_api_base};
