//! Askama template definitions.

use askama::Template;
use inkwell_core::{AssetManifest, ContentEntry, Heading};

/// Full page shell wrapping a pre-rendered fragment
#[derive(Template)]
#[template(path = "layout.html")]
pub struct LayoutTemplate<'a> {
    // Page metadata
    pub title: &'a str,
    pub description: &'a str,

    // Site metadata
    pub site_title: &'a str,
    pub year: i32,

    // Hashed static paths
    pub assets: &'a AssetManifest,

    // Rendered inner fragment
    pub body: &'a str,
}

/// Home page fragment
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub site_title: &'a str,
    pub site_description: &'a str,
}

/// Collection listing fragment
#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate<'a> {
    pub heading: &'a str,
    /// Route prefix entries link under (e.g. "/wiki")
    pub route: &'a str,
    pub entries: &'a [ContentEntry],
}

/// Rendered markdown page fragment
#[derive(Template)]
#[template(path = "content.html")]
pub struct ContentTemplate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub toc: &'a [Heading],
    pub content: &'a str,
}

/// 404 error fragment
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate<'a> {
    pub path: &'a str,
}
