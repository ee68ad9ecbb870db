use crate::client::subscribers::RebuildQueueOnAssignmentsChanged;
use crate::error::PracticeError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use practice_scheduler_api_structs::dtos::FilingAssignmentDTO;
use practice_scheduler_api_structs::set_filing_assignments::*;
use practice_scheduler_domain::{ClientFilingAssignment, ID};
use practice_scheduler_infra::PracticeContext;
use std::collections::HashSet;

pub async fn set_filing_assignments_controller(
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<PracticeContext>,
) -> Result<HttpResponse, PracticeError> {
    let client_id = path_params.into_inner().client_id;
    let assignments = body_params
        .0
        .assignments
        .into_iter()
        .map(|input| {
            let mut assignment = ClientFilingAssignment::new(client_id.clone(), input.filing_type);
            assignment.is_active = input.is_active;
            assignment
        })
        .collect();
    let usecase = SetFilingAssignmentsUseCase {
        client_id,
        assignments,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                assignments: res
                    .assignments
                    .into_iter()
                    .map(FilingAssignmentDTO::new)
                    .collect(),
            })
        })
        .map_err(PracticeError::from)
}

/// Replaces the full set of filing assignments for a client in one go. The
/// list sent by the caller is the new truth, anything missing from it is
/// removed.
#[derive(Debug)]
pub struct SetFilingAssignmentsUseCase {
    pub client_id: ID,
    pub assignments: Vec<ClientFilingAssignment>,
}

#[derive(Debug)]
pub enum UseCaseError {
    ClientNotFound(ID),
    DuplicateFilingType(String),
    Storage,
}

impl From<UseCaseError> for PracticeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ClientNotFound(client_id) => {
                Self::NotFound(format!("The client with id: {}, was not found.", client_id))
            }
            UseCaseError::DuplicateFilingType(filing_type) => Self::BadClientData(format!(
                "The filing type: {} appears more than once in the assignment list.",
                filing_type
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub client_id: ID,
    pub assignments: Vec<ClientFilingAssignment>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetFilingAssignmentsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SetFilingAssignments";

    async fn execute(&mut self, ctx: &PracticeContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.clients.find(&self.client_id).await.is_none() {
            return Err(UseCaseError::ClientNotFound(self.client_id.clone()));
        }

        let mut seen = HashSet::new();
        for assignment in &self.assignments {
            if !seen.insert(assignment.filing_type) {
                return Err(UseCaseError::DuplicateFilingType(
                    assignment.filing_type.display_name().into(),
                ));
            }
        }

        let res = ctx
            .repos
            .filing_assignments
            .save_for_client(&self.client_id, &self.assignments)
            .await;
        match res {
            Ok(_) => Ok(UseCaseRes {
                client_id: self.client_id.clone(),
                assignments: self.assignments.clone(),
            }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RebuildQueueOnAssignmentsChanged)]
    }
}
