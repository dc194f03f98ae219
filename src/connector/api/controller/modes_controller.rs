use anyhow::Result;

use super::super::Container;

pub struct ModesController<'a> {
    container: &'a Container,
}

impl<'a> ModesController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self) -> Result<String> {
        let mut output = "Available modes:\n\n".to_string();
        for (mode, template) in self.container.prompts().iter() {
            output.push_str(&format!("  {:<8} {}\n", mode.as_str(), template.headline()));
        }
        output.push_str("\nUnrecognized modes fall back to 'general'.");
        Ok(output)
    }
}
