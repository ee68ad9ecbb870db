use crate::error::PracticeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::get_audit_log::*;
use practice_scheduler_domain::AuditEntry;
use practice_scheduler_infra::PracticeContext;

/// Newest entries first. The log is append only, staff skim it for
/// expansion skips and render failures.
pub async fn get_audit_log_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let usecase = GetAuditLogUseCase { limit: query.0.limit };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.entries)))
        .map_err(PracticeError::from)
}

#[derive(Debug)]
struct GetAuditLogUseCase {
    limit: Option<usize>,
}

#[derive(Debug)]
struct UseCaseRes {
    pub entries: Vec<AuditEntry>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAuditLogUseCase {
    type Response = UseCaseRes;

    type Error = PracticeError;

    const NAME: &'static str = "GetAuditLog";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        let entries = ctx.repos.audit.find_recent(self.limit.unwrap_or(100)).await;

        Ok(UseCaseRes { entries })
    }
}
