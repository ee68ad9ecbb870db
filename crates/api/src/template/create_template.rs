use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use practice_scheduler_api_structs::create_template::*;
use practice_scheduler_domain::{render, EmailTemplate, RenderContext, RenderError};
use practice_scheduler_infra::PracticeContext;

pub async fn create_template_controller(
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let body = body_params.0;
    let usecase = CreateTemplateUseCase {
        name: body.name,
        subject: body.subject,
        body_text: body.body_text,
        body_html: body.body_html,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.template)))
        .map_err(PracticeError::from)
}

#[derive(Debug)]
struct CreateTemplateUseCase {
    pub name: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidTemplate(RenderError),
    Storage,
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTemplate(err) => {
                Self::BadClientData(format!("The template does not render: {}", err))
            }
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub template: EmailTemplate,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTemplateUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTemplate";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let template = EmailTemplate::new(
            self.name.clone(),
            self.subject.clone(),
            self.body_text.clone(),
            self.body_html.clone(),
        );

        // A template with a typo in a token would otherwise only surface
        // during a batch run, long after the staff member has moved on.
        let sample = RenderContext {
            company_name: "Sample Client Ltd".into(),
            deadline: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            filing_type: "VAT return".into(),
            accountant_name: "Sample Accountant".into(),
        };
        if let Err(e) = render(&template, &sample) {
            return Err(UseCaseError::InvalidTemplate(e));
        }

        let res = ctx.repos.templates.insert(&template).await;
        match res {
            Ok(_) => Ok(UseCaseRes { template }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use practice_scheduler_infra::setup_context;

    #[actix_web::test]
    async fn accepts_a_template_using_every_token() {
        let ctx = setup_context().await;
        let mut usecase = CreateTemplateUseCase {
            name: "First chase".into(),
            subject: "{{filing_type}} due {{deadline}}".into(),
            body_text: "Dear {{company_name}}, regards {{accountant_name}}".into(),
            body_html: "<p>Dear {{company_name}}</p>".into(),
        };
        assert!(usecase.execute(&ctx).await.is_ok());
    }

    #[actix_web::test]
    async fn rejects_a_template_with_an_unknown_token() {
        let ctx = setup_context().await;
        let mut usecase = CreateTemplateUseCase {
            name: "First chase".into(),
            subject: "{{filing_tpye}} is due".into(),
            body_text: "Hello".into(),
            body_html: "<p>Hello</p>".into(),
        };
        assert!(usecase.execute(&ctx).await.is_err());
        assert!(ctx.repos.templates.find_all().await.is_empty());
    }
}
