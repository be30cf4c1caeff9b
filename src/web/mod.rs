//! HTML front end (askama templates)

pub mod handlers;
