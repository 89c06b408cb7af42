//! Site content module
//!
//! Page table, template rendering, project data, and the contact form.

pub mod contact;
pub mod pages;
pub mod projects;
