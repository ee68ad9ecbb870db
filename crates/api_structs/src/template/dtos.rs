use practice_scheduler_domain::{EmailTemplate, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplateDTO {
    pub id: ID,
    pub name: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

impl EmailTemplateDTO {
    pub fn new(template: EmailTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name,
            subject: template.subject,
            body_text: template.body_text,
            body_html: template.body_html,
        }
    }
}
