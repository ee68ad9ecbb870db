use super::ITemplateRepo;
use crate::repos::shared::inmemory_repo::*;
use practice_scheduler_domain::{EmailTemplate, ID};

pub struct InMemoryTemplateRepo {
    templates: std::sync::Mutex<Vec<EmailTemplate>>,
}

impl InMemoryTemplateRepo {
    pub fn new() -> Self {
        Self {
            templates: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITemplateRepo for InMemoryTemplateRepo {
    async fn insert(&self, template: &EmailTemplate) -> anyhow::Result<()> {
        insert(template, &self.templates);
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<EmailTemplate> {
        find(template_id, &self.templates)
    }

    async fn find_many(&self, template_ids: &[ID]) -> Vec<EmailTemplate> {
        find_by(&self.templates, |template| {
            template_ids.contains(&template.id)
        })
    }

    async fn find_all(&self) -> Vec<EmailTemplate> {
        find_by(&self.templates, |_| true)
    }
}
