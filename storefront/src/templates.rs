//! Page templates, compiled into the binary.
//!
//! Templates ending in `.html` are auto-escaped, so product names and toast text coming from the
//! backends cannot inject markup.

use crate::errors::Result;
use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../templates/base.html")),
    ("menu.html", include_str!("../templates/menu.html")),
    ("admin.html", include_str!("../templates/admin.html")),
];

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}
