//! URL handling module for Schema-Scout
//!
//! Provides registrable-domain reduction for harvested links and sitemap URL
//! construction for the domain loop.

mod domain;

pub use domain::{registrable_domain, sitemap_url};
