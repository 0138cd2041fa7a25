//! Gallery page generation.
//!
//! Stage 3 of the build. Takes the sorted list of gallery filenames and
//! renders `gallery.html`: the site's shared page shell (head, sticky
//! navigation with a mobile menu, footer) around a responsive grid with one
//! tile per image.
//!
//! Rendering is pure. The same filenames and settings always produce the
//! same document, so re-running the build on an unchanged directory leaves
//! the page byte-for-byte identical.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Filenames and alt text are escaped automatically. The mobile-menu toggle
//! script is embedded from `static/menu.js` at compile time.

use crate::config::GalleryConfig;
use crate::naming::{AltRule, alt_text};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const MENU_JS: &str = include_str!("../static/menu.js");

const DESCRIPTION: &str =
    "Explore our preschool facilities, classrooms, and learning environments in San Jose.";
const HEADING: &str = "Get Together San Jose Preschool";
const SUBHEADING: &str = "欢乐幼儿园";

/// Wrapper class of a single gallery tile.
pub const TILE_CLASS: &str =
    "rounded-xl overflow-hidden shadow-md hover:shadow-lg transition cursor-pointer";
const TILE_IMG_CLASS: &str = "w-full h-60 object-cover hover:scale-105 transition duration-300";

#[derive(Debug, Clone, Copy, PartialEq)]
enum LinkStyle {
    Plain,
    Current,
    CallToAction,
}

impl LinkStyle {
    fn desktop_class(self) -> &'static str {
        match self {
            LinkStyle::Plain => "text-sm font-medium text-foreground hover:text-primary transition",
            LinkStyle::Current => "text-sm font-medium text-primary transition",
            LinkStyle::CallToAction => {
                "text-sm font-bold text-orange-500 hover:text-orange-600 transition"
            }
        }
    }

    fn mobile_class(self) -> &'static str {
        match self {
            LinkStyle::Plain => {
                "text-sm font-medium text-foreground px-4 py-3 rounded-lg hover:bg-primary/10 hover:text-primary transition"
            }
            LinkStyle::Current => {
                "text-sm font-medium text-primary px-4 py-3 rounded-lg hover:bg-primary/10 transition"
            }
            LinkStyle::CallToAction => {
                "text-sm font-bold text-orange-500 px-4 py-3 rounded-lg hover:bg-orange-50 hover:text-orange-600 transition"
            }
        }
    }
}

const NAV_LINKS: &[(&str, &str, LinkStyle)] = &[
    ("./index.html", "Home", LinkStyle::Plain),
    ("./programs.html", "Programs", LinkStyle::Plain),
    ("./gallery.html", "Gallery", LinkStyle::Current),
    ("./contact.html", "Contact", LinkStyle::Plain),
    ("./apply.html", "Apply", LinkStyle::CallToAction),
];

/// Everything about the page that is not the image list.
#[derive(Debug, Clone)]
pub struct PageSettings<'a> {
    pub site_name: &'a str,
    /// Prefix for `<img src>`, without trailing slash (e.g. `./images`).
    pub images_url: &'a str,
    pub alt_rules: &'a [AltRule],
}

impl<'a> PageSettings<'a> {
    pub fn from_config(config: &'a GalleryConfig) -> Self {
        Self {
            site_name: &config.site_name,
            images_url: config.images_url.trim_end_matches('/'),
            alt_rules: &config.alt_rules,
        }
    }

    fn image_src(&self, filename: &str) -> String {
        format!("{}/{}", self.images_url, filename)
    }
}

/// Render the complete gallery document for `filenames`, in the given order.
pub fn render_gallery(filenames: &[String], page: &PageSettings) -> Markup {
    let logo = page.image_src("logo.png");
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Photo Gallery - " (page.site_name) }
                meta name="description" content=(DESCRIPTION);
                link rel="icon" href=(logo);
                link rel="apple-touch-icon" href=(logo);
                link rel="stylesheet" href="./css/site.css";
            }
            body class="font-sans antialiased" {
                (site_nav(page.site_name, &logo))
                main class="min-h-screen bg-background" {
                    section class="py-20 px-4 sm:px-6 lg:px-8 bg-yellow-50/30" {
                        div class="max-w-6xl mx-auto" {
                            h2 class="text-3xl sm:text-4xl font-bold text-primary mb-12 text-center" {
                                "Gallery"
                            }
                            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6" {
                                @for name in filenames {
                                    (gallery_tile(name, page))
                                }
                            }
                        }
                    }
                }
                (site_footer(page.site_name))
                script { (PreEscaped(MENU_JS)) }
            }
        }
    }
}

/// Write a rendered document, creating the parent directory if needed.
pub fn write_gallery(path: &Path, document: &Markup) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &document.0)?;
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

fn gallery_tile(filename: &str, page: &PageSettings) -> Markup {
    html! {
        div class=(TILE_CLASS) {
            img src=(page.image_src(filename))
                alt=(alt_text(filename, page.site_name, page.alt_rules))
                class=(TILE_IMG_CLASS);
        }
    }
}

fn site_nav(site_name: &str, logo: &str) -> Markup {
    html! {
        nav class="sticky top-0 z-50 bg-white shadow-sm border-b border-border" {
            div class="max-w-6xl mx-auto px-4 sm:px-6 lg:px-8 py-4 flex items-center justify-between" {
                a href="./index.html" class="flex items-center gap-3 hover:opacity-80 transition" {
                    img src=(logo) alt=(site_name) class="h-12 w-auto";
                    div {
                        h1 class="text-sm font-bold text-primary" { (HEADING) }
                        p class="text-sm text-muted-foreground font-kaiti" { (SUBHEADING) }
                    }
                }
                div class="hidden md:flex gap-8 items-center" {
                    @for (href, label, style) in NAV_LINKS {
                        a href=(href) class=(style.desktop_class()) { (label) }
                    }
                }
                button id="mobile-menu-btn"
                    class="md:hidden p-2 text-primary hover:bg-primary/10 rounded-lg transition"
                    aria-label="Toggle menu" {
                    svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"
                        viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"
                        stroke-linecap="round" stroke-linejoin="round" {
                        line x1="3" y1="12" x2="21" y2="12" {}
                        line x1="3" y1="6" x2="21" y2="6" {}
                        line x1="3" y1="18" x2="21" y2="18" {}
                    }
                }
            }
            div id="mobile-menu" class="hidden md:hidden border-t border-border bg-white" {
                div class="px-4 py-2 flex flex-col gap-1" {
                    @for (href, label, style) in NAV_LINKS {
                        a href=(href) class=(style.mobile_class()) { (label) }
                    }
                }
            }
        }
    }
}

fn site_footer(site_name: &str) -> Markup {
    html! {
        footer class="bg-primary text-primary-foreground py-8 px-4 sm:px-6 lg:px-8" {
            div class="max-w-6xl mx-auto" {
                div class="text-center mb-6" {
                    p class="mb-4 font-semibold text-lg" { (site_name) " | San Jose, California" }
                    div class="flex flex-col sm:flex-row gap-4 justify-center items-center text-sm" {
                        a href="tel:+14089088105" class="hover:underline" { "(408) 908-8105" }
                        span class="hidden sm:inline" { "|" }
                        a href="mailto:get2getherpreschool@gmail.com" class="hover:underline" {
                            "get2getherpreschool@gmail.com"
                        }
                        span class="hidden sm:inline" { "|" }
                        a href="https://www.google.com/maps/search/?api=1&query=3394+Zisch+Dr+San+Jose+CA+95118"
                            target="_blank" rel="noopener noreferrer" class="hover:underline" {
                            "3394 Zisch Dr, San Jose, CA 95118"
                        }
                    }
                }
                p class="text-xs opacity-75 text-center mb-2" { "License #434417976" }
                p class="text-xs opacity-75 text-center" {
                    (PreEscaped("&copy;")) " 2025 " (site_name) ". All rights reserved."
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
