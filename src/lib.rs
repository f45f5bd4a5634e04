//! Navigation core for browser-hosted help documents: stable page numbers
//! over CHM urls, table-of-contents assembly, and link dispatch between
//! documents and the surrounding viewer.

pub mod browser;
pub mod chm;
pub mod controller;
pub mod destination;
pub mod geom;
pub mod nav;
pub mod settings;
pub mod toc;
pub mod zoom;
