use axum::response::Html;
use tera::{Context, Tera};

use crate::Result;

const TEMPLATES: [(&str, &str); 9] = [
    ("layout.html", include_str!("../templates/layout.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("shop.html", include_str!("../templates/shop.html")),
    ("items.html", include_str!("../templates/items.html")),
    ("item.html", include_str!("../templates/item.html")),
    ("categories.html", include_str!("../templates/categories.html")),
    ("add_item.html", include_str!("../templates/add_item.html")),
    ("add_category.html", include_str!("../templates/add_category.html")),
    ("404.html", include_str!("../templates/404.html")),
];

/// Server-side views, compiled once at startup.
#[derive(Clone)]
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<Html<String>> {
        Ok(Html(self.tera.render(template, context)?))
    }
}

/// Every view gets a page title and the navigation tag of the active section.
pub fn page(title: &str, active: &str) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("active", active);
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_compiles_and_about_renders() {
        let views = Views::new().unwrap();
        let html = views.render("about.html", &page("About Us", "about")).unwrap();
        assert!(html.0.contains("About Us"));
    }

    #[test]
    fn shop_shows_the_fallback_message() {
        let views = Views::new().unwrap();
        let mut context = page("Shop", "shop");
        context.insert("items", &Vec::<String>::new());
        context.insert("categories", &Vec::<String>::new());
        context.insert("message", "No items found");

        let html = views.render("shop.html", &context).unwrap();
        assert!(html.0.contains("No items found"));
    }
}
