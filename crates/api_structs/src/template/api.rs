use crate::dtos::EmailTemplateDTO;
use practice_scheduler_domain::{EmailTemplate, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub template: EmailTemplateDTO,
}

impl TemplateResponse {
    pub fn new(template: EmailTemplate) -> Self {
        Self {
            template: EmailTemplateDTO::new(template),
        }
    }
}

pub mod create_template {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub subject: String,
        pub body_text: String,
        pub body_html: String,
    }

    pub type APIResponse = TemplateResponse;
}

pub mod get_template {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub template_id: ID,
    }

    pub type APIResponse = TemplateResponse;
}

pub mod get_templates {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub templates: Vec<EmailTemplateDTO>,
    }

    impl APIResponse {
        pub fn new(templates: Vec<EmailTemplate>) -> Self {
            Self {
                templates: templates.into_iter().map(EmailTemplateDTO::new).collect(),
            }
        }
    }
}
