//! HTML report generation
//!
//! Produces one self-contained document: snapshot images are inlined as
//! base64 data URIs so the report is portable without the database.

mod report;

pub use report::{image_data_uri, render_report};
